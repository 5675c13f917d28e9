//! Error types for the webmanifest CLI

use std::io;
use thiserror::Error;
use webmanifest_config::ConfigError;
use webmanifest_core::ManifestError;
use webmanifest_plugin::PluginError;

/// Errors that can occur while running a CLI command
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("File '{0}' already exists (use --force to overwrite)")]
    AlreadyExists(String),

    #[error("Dev server failed: {0}")]
    Server(String),
}
