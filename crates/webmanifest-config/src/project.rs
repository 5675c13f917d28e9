//! Project root and package metadata resolution
//!
//! The package version is read from the project's `package.json`. Projects that
//! have no `package.json` fall back to `Cargo.toml`, looking at `[package]` first
//! and `[workspace.package]` second.

use crate::errors::ProjectError;
use std::fs;
use std::path::{Path, PathBuf};

const PACKAGE_JSON: &str = "package.json";
const CARGO_TOML: &str = "Cargo.toml";

/// Resolve the project root
///
/// An explicit root wins; otherwise the current working directory is used, and
/// `.` if even that cannot be determined.
pub fn resolve_project_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Read the declared package version of the project at `root`
pub fn package_version(root: &Path) -> Result<String, ProjectError> {
    let package_json = root.join(PACKAGE_JSON);
    if package_json.is_file() {
        return version_from_package_json(&package_json);
    }

    let cargo_toml = root.join(CARGO_TOML);
    if cargo_toml.is_file() {
        return version_from_cargo_toml(&cargo_toml);
    }

    Err(ProjectError::MetadataNotFound(root.to_path_buf()))
}

fn version_from_package_json(path: &Path) -> Result<String, ProjectError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ProjectError::Unreadable(format!("Failed to read {}: {}", path.display(), e)))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ProjectError::Unreadable(format!("Failed to parse {}: {}", path.display(), e)))?;

    value
        .get("version")
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProjectError::MissingVersion(path.to_path_buf()))
}

fn version_from_cargo_toml(path: &Path) -> Result<String, ProjectError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ProjectError::Unreadable(format!("Failed to read {}: {}", path.display(), e)))?;
    let value: toml::Table = toml::from_str(&content)
        .map_err(|e| ProjectError::Unreadable(format!("Failed to parse {}: {}", path.display(), e)))?;

    let package_version = value
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());
    let workspace_version = value
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str());

    package_version
        .or(workspace_version)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProjectError::MissingVersion(path.to_path_buf()))
}
