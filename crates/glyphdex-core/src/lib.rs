//! Glyphdex Core - Font Awesome icon metadata, location and autocomplete.
//!
//! This crate locates icon metadata (on disk or on a CDN), parses the
//! `icons.yml` manifest into an icon table, derives a prefix search index
//! from it and answers autocomplete queries for icon pickers and settings
//! forms. It can be used programmatically without any HTTP layer.
//!
//! For the HTTP endpoints, see the `glyphdex-rpc` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use glyphdex_core::Glyphdex;
//!
//! fn main() -> glyphdex_core::Result<()> {
//!     let dex = Glyphdex::open(Path::new("glyphdex.yml"), ".", None)?;
//!
//!     // Autocomplete an icon name
//!     for suggestion in dex.icon_suggestions("hou") {
//!         println!("{}", suggestion.value);
//!     }
//!
//!     // Where does the manifest live under these settings?
//!     if let Some(location) = dex.locate("icons.yml") {
//!         println!("manifest at {}", location);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod autocomplete;
pub mod cache;
pub mod error;
pub mod markup;
pub mod metadata;
pub mod settings;

// Re-export commonly used types
pub use autocomplete::Suggestion;
pub use cache::{MemoryCache, MetadataCache, SqliteCache};
pub use error::{GlyphdexError, Result};
pub use markup::IconSpec;
pub use metadata::{
    IconAliases, IconRecord, IconTable, MetadataLocator, MetadataProvider, SearchIndex,
};
pub use settings::{AssetDelivery, MetadataDelivery, RenderMethod, Settings};

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

/// Main entry point wiring settings, locator, cache and provider together.
///
/// Construction never fails on bad metadata: a missing or malformed
/// manifest degrades to empty suggestion lists, matching the provider's
/// behavior. Only the settings file itself can fail `open`.
pub struct Glyphdex {
    app_root: String,
    settings: Settings,
    provider: MetadataProvider,
}

impl Glyphdex {
    /// Wire up an instance from already-loaded settings.
    ///
    /// `app_root` anchors relative self-hosted paths. The cache is
    /// optional; without one every metadata access falls through to the
    /// manifest.
    pub fn new(
        settings: Settings,
        app_root: impl Into<String>,
        cache: Option<Arc<dyn MetadataCache>>,
    ) -> Self {
        let app_root = app_root.into();
        let locator = MetadataLocator::new(settings.clone(), app_root.clone());
        let provider = MetadataProvider::new(locator, cache);

        Self {
            app_root,
            settings,
            provider,
        }
    }

    /// Load settings from `settings_path` and wire up an instance.
    ///
    /// A missing settings file means defaults. When `cache_db` is given,
    /// the SQLite cache is opened best-effort; failure to open it is
    /// logged and the instance runs uncached.
    pub fn open(
        settings_path: &Path,
        app_root: impl Into<String>,
        cache_db: Option<&Path>,
    ) -> Result<Self> {
        let settings = Settings::load(settings_path)?;

        let cache: Option<Arc<dyn MetadataCache>> = match cache_db {
            Some(db_path) => match SqliteCache::new(db_path) {
                Ok(cache) => Some(Arc::new(cache)),
                Err(e) => {
                    warn!("Failed to open metadata cache (continuing without): {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self::new(settings, app_root, cache))
    }

    /// The settings this instance was built from.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The underlying metadata provider.
    pub fn provider(&self) -> &MetadataProvider {
        &self.provider
    }

    /// Resolve the location of a metadata file under the settings.
    pub fn locate(&self, file: &str) -> Option<String> {
        self.provider.locate(file)
    }

    /// Icon-name suggestions for a partially typed input.
    ///
    /// Blocks on metadata I/O the first time; call from a
    /// blocking-capable thread.
    pub fn icon_suggestions(&self, input: &str) -> Vec<Suggestion> {
        let table = self.provider.icon_table();
        let index = self.provider.search_index();
        autocomplete::icon_suggestions(input, &table, &index)
    }

    /// Wrapper-class suggestions for a partially typed class list.
    pub fn wrapper_class_suggestions(&self, input: &str) -> Vec<Suggestion> {
        autocomplete::wrapper_class_suggestions(input)
    }

    /// Wrapper-style suggestions for a partially typed declaration list.
    pub fn wrapper_style_suggestions(&self, input: &str) -> Vec<Suggestion> {
        autocomplete::wrapper_style_suggestions(input)
    }

    /// Asset CDN suggestions, defaulting to the configured asset version.
    pub fn asset_cdn_uri_suggestions(&self, input: &str, version: Option<&str>) -> Vec<Suggestion> {
        let version = version.unwrap_or(&self.settings.asset.version);
        autocomplete::asset_cdn_uri_suggestions(input, version)
    }

    /// Metadata CDN suggestions, defaulting to the configured asset version.
    pub fn metadata_cdn_uri_suggestions(
        &self,
        input: &str,
        version: Option<&str>,
    ) -> Vec<Suggestion> {
        let version = version.unwrap_or(&self.settings.asset.version);
        autocomplete::metadata_cdn_uri_suggestions(input, version)
    }

    /// Names of the asset bundles a page needs under the settings.
    pub fn asset_bundles(&self) -> Vec<String> {
        assets::asset_bundles(&self.settings)
    }

    /// Check the self-hosted asset directory, returning missing entries.
    ///
    /// Relative paths are anchored at the app root; absolute paths stand
    /// alone.
    pub fn verify_self_hosted_assets(&self) -> Vec<String> {
        let dir = Path::new(&self.app_root).join(&self.settings.asset.self_hosted.path);
        assets::verify_asset_dir(&dir)
    }

    /// Drop the cached icon table and everything derived from it.
    pub fn clear_icon_caches(&self) {
        self.provider.clear_icon_caches();
    }

    /// Drop the cached search index only.
    pub fn clear_search_caches(&self) {
        self.provider.clear_search_caches();
    }
}
