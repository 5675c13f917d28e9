//! Asset output channel
//!
//! The host build tool owns the bundle; the plugin only hands it finished
//! assets through [`AssetEmitter`].

use crate::errors::PluginError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file to be included in the build output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    pub file_name: String,
    pub source: String,
}

/// Host-side sink for emitted assets
pub trait AssetEmitter {
    fn emit_asset(&mut self, asset: EmittedAsset) -> Result<(), PluginError>;
}

/// Collects assets in memory
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    assets: Vec<EmittedAsset>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[EmittedAsset] {
        &self.assets
    }

    pub fn get(&self, file_name: &str) -> Option<&EmittedAsset> {
        self.assets.iter().find(|a| a.file_name == file_name)
    }

    pub fn into_assets(self) -> Vec<EmittedAsset> {
        self.assets
    }
}

impl AssetEmitter for MemoryEmitter {
    fn emit_asset(&mut self, asset: EmittedAsset) -> Result<(), PluginError> {
        if self.get(&asset.file_name).is_some() {
            return Err(PluginError::Emit {
                file_name: asset.file_name,
                reason: "asset already emitted".to_string(),
            });
        }
        self.assets.push(asset);
        Ok(())
    }
}

/// Writes assets straight into an output directory
#[derive(Debug, Clone)]
pub struct DirectoryEmitter {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        DirectoryEmitter {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl AssetEmitter for DirectoryEmitter {
    fn emit_asset(&mut self, asset: EmittedAsset) -> Result<(), PluginError> {
        let file_name = asset.file_name.trim_start_matches('/');
        if file_name.is_empty() {
            return Err(PluginError::Emit {
                file_name: asset.file_name,
                reason: "empty file name".to_string(),
            });
        }

        let target = self.out_dir.join(file_name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, asset.source.as_bytes())?;

        debug!("Emitted {:?}", target);
        self.written.push(target);
        Ok(())
    }
}
