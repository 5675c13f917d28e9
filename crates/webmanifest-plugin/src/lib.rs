//! Build-tool integration for the web app manifest
//!
//! [`ManifestPlugin`] wires `webmanifest-core` into a host build tool:
//!
//! - `build_start` builds the production manifest, caches the payload and
//!   optionally mirrors it to disk in the background
//! - `generate_bundle` emits the cached payload as a build asset
//! - `configure_server` returns an axum router serving `GET /{filename}`
//!
//! ```no_run
//! use webmanifest_config::PluginOptions;
//! use webmanifest_plugin::{BuildPlugin, ManifestPlugin, MemoryEmitter};
//!
//! let mut plugin = ManifestPlugin::new(PluginOptions::default());
//! plugin.build_start()?;
//! let mut emitter = MemoryEmitter::new();
//! plugin.generate_bundle(&mut emitter)?;
//! # Ok::<(), webmanifest_plugin::PluginError>(())
//! ```

pub mod dev_route;
pub mod emitter;
pub mod errors;
pub mod plugin;

pub use dev_route::{dev_router, manifest_response, MANIFEST_CONTENT_TYPE};
pub use emitter::{AssetEmitter, DirectoryEmitter, EmittedAsset, MemoryEmitter};
pub use errors::PluginError;
pub use plugin::{BuildPlugin, HostConfig, ManifestPlugin, MirrorTask, PLUGIN_NAME};
