//! Configuration for the webmanifest plugin
//!
//! Holds the [`PluginOptions`] record the manifest builder consumes, plus the
//! helpers that locate the project root and read its declared package version.
//! Kept separate from `webmanifest-core` so the CLI can load options without
//! pulling in the builder.

pub mod errors;
pub mod options;
pub mod project;

pub use errors::{ConfigError, ProjectError};
pub use options::{
    FormFactor, IconDescriptor, IconPurpose, PluginOptions, ProtocolHandler, RelatedApplication,
    ScreenshotDescriptor, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_FILENAME,
};
pub use project::{package_version, resolve_project_root};
