use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading plugin options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors from package metadata lookups
#[derive(Error, Debug, Clone)]
pub enum ProjectError {
    /// Neither `package.json` nor `Cargo.toml` exists under the root
    #[error("No package metadata found in {}", .0.display())]
    MetadataNotFound(PathBuf),

    /// The metadata file exists but has no usable version
    #[error("No version field in {}", .0.display())]
    MissingVersion(PathBuf),

    /// The metadata file could not be read or parsed
    #[error("{0}")]
    Unreadable(String),
}
