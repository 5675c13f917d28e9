//! Host lifecycle hooks
//!
//! A host build tool drives plugins through [`BuildPlugin`], calling the hooks
//! in order: `config_resolved`, `build_start`, `generate_bundle` for builds and
//! `configure_server` when a dev server starts. Hooks are invoked sequentially.

use crate::dev_route::dev_router;
use crate::emitter::{AssetEmitter, EmittedAsset};
use crate::errors::PluginError;
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};
use webmanifest_config::PluginOptions;
use webmanifest_core::{to_payload, write_if_changed, ManifestBuilder, ManifestError, Mode};

pub const PLUGIN_NAME: &str = "webmanifest";

/// What the host knows once its own configuration is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Project root as seen by the host
    pub root: PathBuf,
    /// Mode the host is running in
    pub mode: Mode,
}

/// Named lifecycle hooks invoked by the host
pub trait BuildPlugin {
    fn name(&self) -> &'static str;

    fn config_resolved(&mut self, _config: &HostConfig) {}

    fn build_start(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    fn generate_bundle(&mut self, _emitter: &mut dyn AssetEmitter) -> Result<(), PluginError> {
        Ok(())
    }

    /// Routes to mount on the host dev server
    fn configure_server(&self) -> Option<Router> {
        None
    }
}

/// A background write of the mirrored manifest
///
/// Dropping the task detaches it; the write still completes and its outcome is
/// logged. [`MirrorTask::join`] waits for it and returns the write result.
#[derive(Debug)]
pub struct MirrorTask {
    path: PathBuf,
    handle: JoinHandle<Result<bool, ManifestError>>,
}

impl MirrorTask {
    fn spawn(path: PathBuf, payload: String) -> Result<Self, PluginError> {
        let thread_path = path.clone();
        let handle = std::thread::Builder::new()
            .name("webmanifest-mirror".to_string())
            .spawn(move || {
                let result = write_if_changed(&thread_path, &payload);
                match &result {
                    Ok(true) => info!("Updated {}", thread_path.display()),
                    Ok(false) => debug!("{} unchanged", thread_path.display()),
                    Err(e) => error!("Failed to write {}: {}", thread_path.display(), e),
                }
                result
            })?;
        Ok(MirrorTask { path, handle })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the write; `Ok(true)` if the file changed
    pub fn join(self) -> Result<bool, PluginError> {
        let result = self.handle.join().map_err(|_| PluginError::MirrorPanicked)?;
        Ok(result?)
    }
}

/// Generates the web app manifest for builds and the dev server
#[derive(Debug)]
pub struct ManifestPlugin {
    builder: ManifestBuilder,
    last_payload: Option<String>,
    mirror: Option<MirrorTask>,
}

impl ManifestPlugin {
    pub fn new(options: PluginOptions) -> Self {
        Self::from_builder(ManifestBuilder::new(options))
    }

    /// Wrap a builder that already carries a transform or metadata source
    pub fn from_builder(builder: ManifestBuilder) -> Self {
        ManifestPlugin {
            builder,
            last_payload: None,
            mirror: None,
        }
    }

    pub fn builder(&self) -> &ManifestBuilder {
        &self.builder
    }

    /// Payload produced by the most recent `build_start`
    pub fn last_payload(&self) -> Option<&str> {
        self.last_payload.as_deref()
    }

    /// Take the handle of the mirror write started by the last `build_start`
    pub fn take_mirror_task(&mut self) -> Option<MirrorTask> {
        self.mirror.take()
    }

    fn production_payload(&self) -> Result<String, PluginError> {
        let manifest = self.builder.build(Mode::Production)?;
        Ok(to_payload(&manifest)?)
    }
}

impl BuildPlugin for ManifestPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn config_resolved(&mut self, config: &HostConfig) {
        debug!(
            "Host resolved: root={} mode={}",
            config.root.display(),
            config.mode
        );
        self.builder.set_root(config.root.clone());
    }

    fn build_start(&mut self) -> Result<(), PluginError> {
        let payload = self.production_payload()?;
        self.last_payload = Some(payload.clone());

        if let Some(path) = self.builder.options().mirror_path(self.builder.root()) {
            debug!("Mirroring manifest to {}", path.display());
            self.mirror = Some(MirrorTask::spawn(path, payload)?);
        }
        Ok(())
    }

    fn generate_bundle(&mut self, emitter: &mut dyn AssetEmitter) -> Result<(), PluginError> {
        let source = match &self.last_payload {
            Some(payload) => payload.clone(),
            None => {
                debug!("generate_bundle without build_start, building now");
                self.production_payload()?
            }
        };

        let file_name = self.builder.options().filename().to_string();
        debug!("Emitting {}", file_name);
        emitter.emit_asset(EmittedAsset { file_name, source })
    }

    fn configure_server(&self) -> Option<Router> {
        Some(dev_router(Arc::new(self.builder.clone())))
    }
}
