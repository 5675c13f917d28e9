//! Build metadata attached to the manifest
//!
//! Three members are added unless `include_build_meta` is `false`:
//!
//! - `pkgVersion`: declared version from the project's package metadata
//! - `version`: a short identifier from git, falling back to `pkgVersion`
//! - `buildTime`: UTC timestamp of the build, ISO-8601 with milliseconds
//!
//! Every lookup is a single best-effort attempt. Failures only mean the member
//! is left out.

use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Where package and version-control identifiers come from
pub trait BuildMetaSource: Send + Sync {
    /// Declared package version, if any
    fn package_version(&self) -> Option<String>;

    /// Short version-control identifier for the current checkout, if any
    fn vcs_version(&self) -> Option<String>;
}

/// Reads `package.json`/`Cargo.toml` and asks `git` about the project at `root`
#[derive(Debug, Clone)]
pub struct ProjectMeta {
    root: PathBuf,
}

impl ProjectMeta {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectMeta { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BuildMetaSource for ProjectMeta {
    fn package_version(&self) -> Option<String> {
        match webmanifest_config::package_version(&self.root) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("Package version unavailable: {}", e);
                None
            }
        }
    }

    fn vcs_version(&self) -> Option<String> {
        let git = match which::which("git") {
            Ok(path) => path,
            Err(e) => {
                debug!("git not found on PATH: {}", e);
                return None;
            }
        };

        // Exact tag, then nearest tag with distance, then the short hash
        const LOOKUPS: &[&[&str]] = &[
            &["describe", "--tags", "--exact-match"],
            &["describe", "--tags"],
            &["rev-parse", "--short", "HEAD"],
        ];

        LOOKUPS
            .iter()
            .find_map(|args| run_git(&git, &self.root, args))
    }
}

fn run_git(git: &Path, root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new(git)
        .args(args)
        .current_dir(root)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
        Ok(output) => {
            debug!("git {} exited with {:?}", args.join(" "), output.status.code());
            None
        }
        Err(e) => {
            debug!("Failed to run git {}: {}", args.join(" "), e);
            None
        }
    }
}

/// Fixed identifiers, for embedders that already know them (and for tests)
#[derive(Debug, Clone, Default)]
pub struct StaticMeta {
    pub package_version: Option<String>,
    pub vcs_version: Option<String>,
}

impl BuildMetaSource for StaticMeta {
    fn package_version(&self) -> Option<String> {
        self.package_version.clone()
    }

    fn vcs_version(&self) -> Option<String> {
        self.vcs_version.clone()
    }
}

/// Resolved build metadata for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMeta {
    pub pkg_version: Option<String>,
    pub version: Option<String>,
    pub build_time: String,
}

impl BuildMeta {
    /// Collect metadata now; `buildTime` is taken at call time
    pub fn collect(source: &dyn BuildMetaSource) -> Self {
        let pkg_version = source.package_version();
        let version = source.vcs_version().or_else(|| pkg_version.clone());
        BuildMeta {
            pkg_version,
            version,
            build_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
