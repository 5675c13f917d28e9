use std::io;
use thiserror::Error;
use webmanifest_core::ManifestError;

/// Errors surfaced to the host from plugin hooks
#[derive(Error, Debug)]
pub enum PluginError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to emit asset '{file_name}': {reason}")]
    Emit { file_name: String, reason: String },

    #[error("Manifest mirror thread panicked")]
    MirrorPanicked,
}
