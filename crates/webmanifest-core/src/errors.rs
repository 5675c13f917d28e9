use std::io;
use thiserror::Error;

/// Errors that can occur while building, serializing or mirroring a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Manifest transform failed: {0}")]
    Transform(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_transform_error_display() {
        let err = ManifestError::Transform(anyhow::anyhow!("name must not be empty"));
        assert_eq!(
            err.to_string(),
            "Manifest transform failed: name must not be empty"
        );
    }
}
