//! Web app manifest generation
//!
//! This crate turns [`PluginOptions`](webmanifest_config::PluginOptions) into a
//! web app manifest document, serializes it into the canonical payload and
//! mirrors that payload to disk. It has no knowledge of any host build tool;
//! see `webmanifest-plugin` for the lifecycle glue.

pub mod build_meta;
pub mod builder;
pub mod errors;
pub mod mirror;
pub mod serializer;
pub mod types;

pub use build_meta::{BuildMeta, BuildMetaSource, ProjectMeta, StaticMeta};
pub use builder::{
    default_icons, ensure_leading_slash, normalize_icons, ManifestBuilder, ManifestTransform,
};
pub use errors::ManifestError;
pub use mirror::write_if_changed;
pub use serializer::{etag, to_payload, Payload};
pub use types::{Manifest, Mode, TransformContext};
