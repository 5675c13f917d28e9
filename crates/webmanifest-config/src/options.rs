//! Plugin options
//!
//! Everything the manifest builder reads comes from [`PluginOptions`]. Options are
//! immutable once handed to the plugin. They can be assembled in code or loaded
//! from a `webmanifest.toml` file:
//!
//! ```toml
//! name = "Field Notes"
//! short_name = "Notes"
//! theme_color = "#112233"
//! output_dir = "public"
//!
//! [[icons]]
//! src = "icons/notes-512.png"
//! sizes = "512x512"
//! type = "image/png"
//! purpose = "maskable"
//!
//! [extra]
//! edge_side_panel = { preferred_width = 400 }
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used for the emitted asset, the mirror and the dev route
pub const DEFAULT_FILENAME: &str = "manifest.json";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "webmanifest.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "WEBMANIFEST_CONFIG";

/// Allowed values for an icon's `purpose` member
///
/// Unlike other optional fields, `purpose` is checked when options are parsed:
/// a config file with any other value fails to load with
/// [`ConfigError::Parse`](crate::ConfigError::Parse) instead of passing the
/// value through to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconPurpose {
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "maskable")]
    Maskable,
    #[serde(rename = "monochrome")]
    Monochrome,
    #[serde(rename = "any maskable")]
    AnyMaskable,
}

impl IconPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconPurpose::Any => "any",
            IconPurpose::Maskable => "maskable",
            IconPurpose::Monochrome => "monochrome",
            IconPurpose::AnyMaskable => "any maskable",
        }
    }

    /// Whether the purpose carries the `maskable` token
    pub fn is_maskable(&self) -> bool {
        matches!(self, IconPurpose::Maskable | IconPurpose::AnyMaskable)
    }
}

impl std::fmt::Display for IconPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the manifest `icons` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<IconPurpose>,
}

impl IconDescriptor {
    pub fn new(src: impl Into<String>, sizes: impl Into<String>) -> Self {
        IconDescriptor {
            src: src.into(),
            sizes: sizes.into(),
            mime_type: None,
            purpose: None,
        }
    }

    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_purpose(mut self, purpose: IconPurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }
}

/// Screenshot form factor hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    Wide,
    Narrow,
}

/// A single entry of the manifest `screenshots` list (passed through as-is)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotDescriptor {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<FormFactor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedApplication {
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolHandler {
    pub protocol: String,
    pub url: String,
}

/// Options for the manifest plugin
///
/// Every field is optional. Absent identity and presentation fields fall back to
/// the builder defaults; absent list fields are left out of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_related_applications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_applications: Option<Vec<RelatedApplication>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_handlers: Option<Vec<ProtocolHandler>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<IconDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<ScreenshotDescriptor>>,

    /// Arbitrary members merged over the generated manifest
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,

    /// Attach `pkgVersion`, `version` and `buildTime` (on unless set to false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_build_meta: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Directory (relative to the project root) that receives a copy of the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Project root; defaults to whatever the host reports, then the working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl PluginOptions {
    /// Location of the config file: `WEBMANIFEST_CONFIG` if set, else `webmanifest.toml`
    pub fn default_path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load options from a TOML file, returning defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(PluginOptions::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Name of the emitted manifest file
    pub fn filename(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_FILENAME,
        }
    }

    /// Path served by the dev route, e.g. `/manifest.json`
    pub fn route_path(&self) -> String {
        format!("/{}", self.filename().trim_start_matches('/'))
    }

    pub fn include_build_meta(&self) -> bool {
        self.include_build_meta != Some(false)
    }

    /// Where the mirrored manifest goes, if mirroring is enabled
    ///
    /// An absolute `output_dir` is used as-is; a relative one is resolved against `root`.
    pub fn mirror_path(&self, root: &Path) -> Option<PathBuf> {
        let output_dir = self.output_dir.as_ref()?;
        if output_dir.as_os_str().is_empty() {
            return None;
        }
        Some(root.join(output_dir).join(self.filename()))
    }
}
