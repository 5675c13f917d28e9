//! Manifest builder
//!
//! Turns [`PluginOptions`] into a [`Manifest`] for a given [`Mode`]. Building runs
//! in four steps:
//!
//! 1. assemble members from options, substituting defaults
//! 2. attach build metadata (unless disabled)
//! 3. shallow-merge `extra` on top
//! 4. hand the result to the user transform, if one is configured
//!
//! No option is rejected here; the transform output is taken as-is.

use crate::build_meta::{BuildMeta, BuildMetaSource, ProjectMeta};
use crate::errors::ManifestError;
use crate::types::{Manifest, Mode, TransformContext};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use webmanifest_config::{IconDescriptor, IconPurpose, PluginOptions};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_DIR: &str = "ltr";
pub const DEFAULT_NAME: &str = "My App";
pub const DEFAULT_SHORT_NAME: &str = "App";
pub const DEFAULT_DISPLAY: &str = "standalone";
pub const DEFAULT_THEME_COLOR: &str = "#0a131b";

/// User hook run on the assembled manifest
///
/// The returned document replaces the input entirely. Errors propagate out of
/// [`ManifestBuilder::build`] as [`ManifestError::Transform`].
pub trait ManifestTransform: Send + Sync {
    fn transform(&self, manifest: Manifest, ctx: TransformContext) -> anyhow::Result<Manifest>;
}

impl<F> ManifestTransform for F
where
    F: Fn(Manifest, TransformContext) -> anyhow::Result<Manifest> + Send + Sync,
{
    fn transform(&self, manifest: Manifest, ctx: TransformContext) -> anyhow::Result<Manifest> {
        self(manifest, ctx)
    }
}

/// Icons used when the options supply none
pub fn default_icons() -> Vec<IconDescriptor> {
    vec![
        IconDescriptor::new("/icons/icon-192x192.png", "192x192")
            .with_type("image/png")
            .with_purpose(IconPurpose::AnyMaskable),
        IconDescriptor::new("/icons/icon-512x512.png", "512x512")
            .with_type("image/png")
            .with_purpose(IconPurpose::AnyMaskable),
    ]
}

/// Prefix `value` with `/` unless it already starts with one
pub fn ensure_leading_slash(value: &str) -> String {
    if value.starts_with('/') {
        value.to_string()
    } else {
        format!("/{}", value)
    }
}

/// Normalize icon paths and drop later duplicates of a `(src, sizes, purpose)` triple
pub fn normalize_icons(icons: &[IconDescriptor]) -> Vec<IconDescriptor> {
    let mut seen: HashSet<(String, String, Option<IconPurpose>)> = HashSet::new();
    icons
        .iter()
        .map(|icon| IconDescriptor {
            src: ensure_leading_slash(&icon.src),
            ..icon.clone()
        })
        .filter(|icon| seen.insert((icon.src.clone(), icon.sizes.clone(), icon.purpose)))
        .collect()
}

/// Builds manifest documents from a fixed set of options
#[derive(Clone)]
pub struct ManifestBuilder {
    options: PluginOptions,
    root: PathBuf,
    meta: Option<Arc<dyn BuildMetaSource>>,
    transform: Option<Arc<dyn ManifestTransform>>,
}

impl ManifestBuilder {
    pub fn new(options: PluginOptions) -> Self {
        let root = webmanifest_config::resolve_project_root(options.root.as_deref());
        ManifestBuilder {
            options,
            root,
            meta: None,
            transform: None,
        }
    }

    /// Attach a transform closure
    pub fn with_transform<F>(self, transform: F) -> Self
    where
        F: Fn(Manifest, TransformContext) -> anyhow::Result<Manifest> + Send + Sync + 'static,
    {
        self.with_transformer(Arc::new(transform))
    }

    /// Attach a shared transform implementation
    pub fn with_transformer(mut self, transform: Arc<dyn ManifestTransform>) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Replace the package/git lookups (defaults to [`ProjectMeta`] on the project root)
    pub fn with_meta_source(mut self, meta: Arc<dyn BuildMetaSource>) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Point the builder at a new project root, unless the options pin one
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        if self.options.root.is_some() {
            debug!("Project root pinned by options, ignoring host root");
            return;
        }
        self.root = root.into();
    }

    /// Build the manifest for `mode`
    pub fn build(&self, mode: Mode) -> Result<Manifest, ManifestError> {
        let mut manifest = self.assemble()?;

        if self.options.include_build_meta() {
            self.attach_build_meta(&mut manifest);
        }

        for (key, value) in &self.options.extra {
            manifest.insert(key.clone(), value.clone());
        }

        let manifest = match &self.transform {
            Some(transform) => transform
                .transform(manifest, TransformContext { mode })
                .map_err(ManifestError::Transform)?,
            None => manifest,
        };

        if !manifest.has_maskable_icon() {
            warn!("No maskable icon in manifest; some platforms will letterbox the app icon");
        }

        Ok(manifest)
    }

    fn assemble(&self) -> Result<Manifest, ManifestError> {
        let opts = &self.options;
        let mut manifest = Manifest::new();

        manifest.insert("lang", opts.lang.as_deref().unwrap_or(DEFAULT_LANG));
        manifest.insert("dir", opts.dir.as_deref().unwrap_or(DEFAULT_DIR));
        manifest.insert("name", opts.name.as_deref().unwrap_or(DEFAULT_NAME));
        manifest.insert(
            "short_name",
            opts.short_name.as_deref().unwrap_or(DEFAULT_SHORT_NAME),
        );
        if let Some(description) = &opts.description {
            manifest.insert("description", description.as_str());
        }

        for (key, value) in [
            ("start_url", &opts.start_url),
            ("scope", &opts.scope),
            ("id", &opts.id),
        ] {
            manifest.insert(key, ensure_leading_slash(value.as_deref().unwrap_or("/")));
        }

        manifest.insert("display", opts.display.as_deref().unwrap_or(DEFAULT_DISPLAY));
        if let Some(orientation) = &opts.orientation {
            manifest.insert("orientation", orientation.as_str());
        }

        let theme_color = opts.theme_color.as_deref().unwrap_or(DEFAULT_THEME_COLOR);
        let background_color = opts.background_color.as_deref().unwrap_or(theme_color);
        manifest.insert("background_color", background_color);
        manifest.insert("theme_color", theme_color);

        let icons = match &opts.icons {
            Some(icons) => normalize_icons(icons),
            None => default_icons(),
        };
        manifest.insert("icons", serde_json::to_value(&icons)?);

        if let Some(screenshots) = &opts.screenshots {
            manifest.insert("screenshots", serde_json::to_value(screenshots)?);
        }
        if let Some(categories) = &opts.categories {
            manifest.insert("categories", serde_json::to_value(categories)?);
        }
        if let Some(prefer) = opts.prefer_related_applications {
            manifest.insert("prefer_related_applications", prefer);
        }
        if let Some(related) = &opts.related_applications {
            manifest.insert("related_applications", serde_json::to_value(related)?);
        }
        if let Some(handlers) = &opts.protocol_handlers {
            manifest.insert("protocol_handlers", serde_json::to_value(handlers)?);
        }

        Ok(manifest)
    }

    fn attach_build_meta(&self, manifest: &mut Manifest) {
        let meta = match &self.meta {
            Some(source) => BuildMeta::collect(source.as_ref()),
            None => BuildMeta::collect(&ProjectMeta::new(&self.root)),
        };

        if let Some(pkg_version) = meta.pkg_version {
            manifest.insert("pkgVersion", pkg_version);
        }
        if let Some(version) = meta.version {
            manifest.insert("version", version);
        }
        manifest.insert("buildTime", meta.build_time);
    }
}

impl std::fmt::Debug for ManifestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestBuilder")
            .field("options", &self.options)
            .field("root", &self.root)
            .field("custom_meta", &self.meta.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_meta::StaticMeta;
    use serde_json::{json, Value};
    use webmanifest_config::ScreenshotDescriptor;

    fn builder(options: PluginOptions) -> ManifestBuilder {
        ManifestBuilder::new(options).with_meta_source(Arc::new(StaticMeta::default()))
    }

    fn no_meta(options: PluginOptions) -> PluginOptions {
        PluginOptions {
            include_build_meta: Some(false),
            ..options
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut inner) = self.0.lock() {
                inner.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return the warnings it logged
    fn captured_warnings(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_defaults_match_reference_manifest() {
        let manifest = builder(no_meta(PluginOptions::default())).build(Mode::Production);
        assert!(manifest.is_ok());
        let manifest = manifest.unwrap_or_default();

        let expected = json!({
            "lang": "en", "dir": "ltr", "name": "My App", "short_name": "App",
            "start_url": "/", "scope": "/", "id": "/", "display": "standalone",
            "background_color": "#0a131b", "theme_color": "#0a131b",
            "icons": [
                {"src": "/icons/icon-192x192.png", "sizes": "192x192", "type": "image/png", "purpose": "any maskable"},
                {"src": "/icons/icon-512x512.png", "sizes": "512x512", "type": "image/png", "purpose": "any maskable"}
            ]
        });
        assert_eq!(Value::from(manifest.clone()), expected);

        let keys: Vec<&String> = manifest.keys().collect();
        assert_eq!(
            keys,
            vec![
                "lang",
                "dir",
                "name",
                "short_name",
                "start_url",
                "scope",
                "id",
                "display",
                "background_color",
                "theme_color",
                "icons"
            ]
        );
    }

    #[test]
    fn test_absent_optional_members_are_omitted() {
        let manifest = builder(no_meta(PluginOptions::default()))
            .build(Mode::Production)
            .unwrap_or_default();
        for key in [
            "description",
            "orientation",
            "categories",
            "prefer_related_applications",
            "related_applications",
            "protocol_handlers",
            "screenshots",
        ] {
            assert!(!manifest.contains_key(key), "{} should be absent", key);
        }
    }

    #[test]
    fn test_navigation_paths_get_leading_slash() {
        let options = no_meta(PluginOptions {
            start_url: Some("app/index.html".to_string()),
            scope: Some("/app/".to_string()),
            id: Some("notes".to_string()),
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();
        assert_eq!(manifest.get_str("start_url"), Some("/app/index.html"));
        assert_eq!(manifest.get_str("scope"), Some("/app/"));
        assert_eq!(manifest.get_str("id"), Some("/notes"));
    }

    #[test]
    fn test_ensure_leading_slash_idempotent() {
        for value in ["", "a", "/a", "//a", "a/b/"] {
            let once = ensure_leading_slash(value);
            assert!(once.starts_with('/'));
            assert_eq!(ensure_leading_slash(&once), once);
        }
        assert_eq!(ensure_leading_slash("a"), "/a");
        assert_eq!(ensure_leading_slash("/a"), "/a");
    }

    #[test]
    fn test_background_follows_theme_color() {
        let options = no_meta(PluginOptions {
            theme_color: Some("#ffffff".to_string()),
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();
        assert_eq!(manifest.get_str("background_color"), Some("#ffffff"));

        let options = no_meta(PluginOptions {
            theme_color: Some("#ffffff".to_string()),
            background_color: Some("#000000".to_string()),
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();
        assert_eq!(manifest.get_str("background_color"), Some("#000000"));
        assert_eq!(manifest.get_str("theme_color"), Some("#ffffff"));
    }

    #[test]
    fn test_icons_normalized_and_deduplicated() {
        let icons = vec![
            IconDescriptor::new("icons/a.png", "48x48").with_purpose(IconPurpose::Maskable),
            IconDescriptor::new("/icons/b.png", "96x96"),
            IconDescriptor::new("/icons/a.png", "48x48")
                .with_type("image/webp")
                .with_purpose(IconPurpose::Maskable),
            IconDescriptor::new("/icons/a.png", "48x48").with_purpose(IconPurpose::Any),
            IconDescriptor::new("icons/b.png", "96x96"),
        ];
        let normalized = normalize_icons(&icons);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].src, "/icons/a.png");
        assert_eq!(normalized[0].mime_type, None);
        assert_eq!(normalized[1].src, "/icons/b.png");
        assert_eq!(normalized[2].purpose, Some(IconPurpose::Any));
    }

    #[test]
    fn test_supplied_icons_replace_defaults() {
        let options = no_meta(PluginOptions {
            icons: Some(vec![IconDescriptor::new("logo.svg", "any")]),
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();
        assert_eq!(
            manifest.get("icons"),
            Some(&json!([{ "src": "/logo.svg", "sizes": "any" }]))
        );
        assert!(!manifest.has_maskable_icon());
    }

    #[test]
    fn test_default_icons_do_not_warn() {
        let logs = captured_warnings(|| {
            let built = builder(no_meta(PluginOptions::default())).build(Mode::Production);
            assert!(built.is_ok_and(|m| m.has_maskable_icon()));
        });
        assert!(!logs.contains("No maskable icon"), "unexpected: {}", logs);
    }

    #[test]
    fn test_missing_maskable_icon_warns() {
        let options = no_meta(PluginOptions {
            icons: Some(vec![
                IconDescriptor::new("logo.svg", "any").with_purpose(IconPurpose::Any)
            ]),
            ..Default::default()
        });
        let logs = captured_warnings(|| {
            assert!(builder(options).build(Mode::Production).is_ok());
        });
        assert!(logs.contains("WARN"));
        assert!(logs.contains("No maskable icon"));
    }

    #[test]
    fn test_warning_checks_transformed_manifest() {
        let stripped = builder(no_meta(PluginOptions::default())).with_transform(|mut m, _| {
            m.insert("icons", json!([{ "src": "/mono.png", "sizes": "96x96", "purpose": "monochrome" }]));
            Ok(m)
        });
        let logs = captured_warnings(|| {
            assert!(stripped.build(Mode::Development).is_ok());
        });
        assert!(logs.contains("No maskable icon"));
    }

    #[test]
    fn test_screenshots_passed_through() {
        let options = no_meta(PluginOptions {
            screenshots: Some(vec![ScreenshotDescriptor {
                src: "shots/home.png".to_string(),
                sizes: Some("1280x720".to_string()),
                mime_type: None,
                label: Some("Home".to_string()),
                form_factor: Some(webmanifest_config::FormFactor::Wide),
            }]),
            categories: Some(vec!["productivity".to_string()]),
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();
        assert_eq!(
            manifest.get("screenshots"),
            Some(&json!([{
                "src": "shots/home.png",
                "sizes": "1280x720",
                "label": "Home",
                "form_factor": "wide"
            }]))
        );
        assert_eq!(manifest.get("categories"), Some(&json!(["productivity"])));
    }

    #[test]
    fn test_build_meta_attached_by_default() {
        let builder = ManifestBuilder::new(PluginOptions::default()).with_meta_source(Arc::new(
            StaticMeta {
                package_version: Some("1.2.3".to_string()),
                vcs_version: Some("abc1234".to_string()),
            },
        ));
        let manifest = builder.build(Mode::Production).unwrap_or_default();
        assert_eq!(manifest.get_str("pkgVersion"), Some("1.2.3"));
        assert_eq!(manifest.get_str("version"), Some("abc1234"));
        assert!(manifest.get_str("buildTime").is_some());
    }

    #[test]
    fn test_build_meta_disabled() {
        let manifest = builder(no_meta(PluginOptions::default()))
            .build(Mode::Production)
            .unwrap_or_default();
        assert!(!manifest.contains_key("pkgVersion"));
        assert!(!manifest.contains_key("version"));
        assert!(!manifest.contains_key("buildTime"));
    }

    #[test]
    fn test_missing_versions_are_omitted() {
        let manifest = builder(PluginOptions::default())
            .build(Mode::Production)
            .unwrap_or_default();
        assert!(!manifest.contains_key("pkgVersion"));
        assert!(!manifest.contains_key("version"));
        assert!(manifest.contains_key("buildTime"));
    }

    #[test]
    fn test_extra_fields_win() {
        let mut extra = serde_json::Map::new();
        extra.insert("name".to_string(), json!("Overridden"));
        extra.insert("edge_side_panel".to_string(), json!({ "preferred_width": 400 }));
        let options = no_meta(PluginOptions {
            extra,
            ..Default::default()
        });
        let manifest = builder(options).build(Mode::Production).unwrap_or_default();

        assert_eq!(manifest.get_str("name"), Some("Overridden"));
        assert_eq!(manifest.keys().nth(2).map(String::as_str), Some("name"));
        assert_eq!(
            manifest.keys().last().map(String::as_str),
            Some("edge_side_panel")
        );
    }

    #[test]
    fn test_transform_sees_mode() {
        let builder = builder(no_meta(PluginOptions::default())).with_transform(|mut m, ctx| {
            if ctx.mode == Mode::Development {
                m.insert("name", "X");
            }
            Ok(m)
        });

        let dev = builder.build(Mode::Development).unwrap_or_default();
        assert_eq!(dev.get_str("name"), Some("X"));

        let prod = builder.build(Mode::Production).unwrap_or_default();
        assert_eq!(prod.get_str("name"), Some(DEFAULT_NAME));
    }

    #[test]
    fn test_transform_output_is_authoritative() {
        let builder = builder(no_meta(PluginOptions::default())).with_transform(|_, _| {
            let mut replaced = Manifest::new();
            replaced.insert("name", "Only");
            Ok(replaced)
        });
        let manifest = builder.build(Mode::Production).unwrap_or_default();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get_str("name"), Some("Only"));
    }

    #[test]
    fn test_transform_error_propagates() {
        let builder = builder(PluginOptions::default())
            .with_transform(|_, _| Err(anyhow::anyhow!("refusing to build")));
        let result = builder.build(Mode::Production);
        assert!(matches!(result, Err(ManifestError::Transform(_))));
    }

    #[test]
    fn test_set_root_respects_pinned_root() {
        let mut pinned = ManifestBuilder::new(PluginOptions {
            root: Some(PathBuf::from("/pinned")),
            ..Default::default()
        });
        pinned.set_root("/host");
        assert_eq!(pinned.root(), Path::new("/pinned"));

        let mut floating = ManifestBuilder::new(PluginOptions::default());
        floating.set_root("/host");
        assert_eq!(floating.root(), Path::new("/host"));
    }
}
