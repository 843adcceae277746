//! Cached access to the parsed icon table and search index.
//!
//! The provider glues the locator, the manifest parser, and the cache
//! port together. Callers only ever see a table and an index; every
//! failure mode (undetermined location, unreachable manifest, malformed
//! document) degrades to empty results and a log line.

use crate::cache::MetadataCache;
use crate::error::{GlyphdexError, Result};
use crate::metadata::{IconTable, MetadataLocator, SearchIndex};
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Manifest filename within the metadata location.
pub const MANIFEST_FILE: &str = "icons.yml";

/// Tag carried by every cached payload. Invalidating it drops all
/// metadata caches at once, for when settings change out from under us.
pub const SETTINGS_CACHE_TAG: &str = "glyphdex:settings";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

struct CacheKeys {
    location: String,
    table: String,
    index: String,
}

/// Provides the icon table and search index, caching both.
///
/// Two cache levels: an in-process memo for repeated calls on the same
/// provider, and the injected [`MetadataCache`] for persistence across
/// processes. Empty results are never cached or memoized, so a provider
/// that came up before its manifest was reachable recovers on a later
/// call.
///
/// Methods block on I/O; call them from a blocking-capable thread.
pub struct MetadataProvider {
    locator: MetadataLocator,
    cache: Option<Arc<dyn MetadataCache>>,
    table_memo: Mutex<Option<Arc<IconTable>>>,
    index_memo: Mutex<Option<Arc<SearchIndex>>>,
}

impl MetadataProvider {
    pub fn new(locator: MetadataLocator, cache: Option<Arc<dyn MetadataCache>>) -> Self {
        Self {
            locator,
            cache,
            table_memo: Mutex::new(None),
            index_memo: Mutex::new(None),
        }
    }

    /// Resolve the location of a metadata file. See [`MetadataLocator::locate`].
    pub fn locate(&self, file: &str) -> Option<String> {
        self.locator.locate(file)
    }

    /// The parsed icon catalog.
    ///
    /// Empty when the manifest cannot be located, fetched, or parsed.
    pub fn icon_table(&self) -> Arc<IconTable> {
        if let Some(table) = lock_memo(&self.table_memo) {
            return table;
        }

        let keys = self.cache_keys();

        if let (Some(cache), Some(keys)) = (&self.cache, &keys) {
            if let Some(bytes) = cache.get(&keys.table) {
                match serde_json::from_slice::<IconTable>(&bytes) {
                    Ok(table) => {
                        let table = Arc::new(table);
                        store_memo(&self.table_memo, &table);
                        return table;
                    }
                    Err(e) => warn!("Discarding undecodable cached icon table: {}", e),
                }
            }
        }

        let table = Arc::new(match &keys {
            Some(keys) => self.load_table(&keys.location),
            None => {
                debug!("Metadata location undetermined, icon table is empty");
                IconTable::default()
            }
        });

        // An empty table usually means a failed fetch; caching it would
        // pin the failure.
        if !table.is_empty() {
            if let (Some(cache), Some(keys)) = (&self.cache, &keys) {
                match serde_json::to_vec(&*table) {
                    Ok(bytes) => {
                        cache.set(&keys.table, &bytes, &[SETTINGS_CACHE_TAG, &keys.table])
                    }
                    Err(e) => warn!("Failed to encode icon table for caching: {}", e),
                }
            }
            store_memo(&self.table_memo, &table);
        }

        table
    }

    /// The prefix-search index derived from [`Self::icon_table`].
    pub fn search_index(&self) -> Arc<SearchIndex> {
        if let Some(index) = lock_memo(&self.index_memo) {
            return index;
        }

        let keys = self.cache_keys();

        if let (Some(cache), Some(keys)) = (&self.cache, &keys) {
            if let Some(bytes) = cache.get(&keys.index) {
                match serde_json::from_slice::<SearchIndex>(&bytes) {
                    Ok(index) => {
                        let index = Arc::new(index);
                        store_memo(&self.index_memo, &index);
                        return index;
                    }
                    Err(e) => warn!("Discarding undecodable cached search index: {}", e),
                }
            }
        }

        let table = self.icon_table();
        if table.is_empty() {
            return Arc::new(SearchIndex::default());
        }

        let index = Arc::new(SearchIndex::build(&table));
        debug!(
            "Built search index: {} terms over {} icons",
            index.len(),
            table.len()
        );

        if let (Some(cache), Some(keys)) = (&self.cache, &keys) {
            match serde_json::to_vec(&*index) {
                Ok(bytes) => cache.set(
                    &keys.index,
                    &bytes,
                    &[SETTINGS_CACHE_TAG, &keys.table, &keys.index],
                ),
                Err(e) => warn!("Failed to encode search index for caching: {}", e),
            }
        }
        store_memo(&self.index_memo, &index);

        index
    }

    /// Drop cached icon data. The search index depends on it, so that
    /// falls too.
    pub fn clear_icon_caches(&self) {
        if let (Some(cache), Some(keys)) = (&self.cache, &self.cache_keys()) {
            cache.invalidate_tags(&[&keys.table]);
        }
        clear_memo(&self.table_memo);
        clear_memo(&self.index_memo);
    }

    /// Drop only the cached search index, keeping the icon table.
    pub fn clear_search_caches(&self) {
        if let (Some(cache), Some(keys)) = (&self.cache, &self.cache_keys()) {
            cache.invalidate_tags(&[&keys.index]);
        }
        clear_memo(&self.index_memo);
    }

    /// Cache keys are scoped to a fingerprint of the resolved manifest
    /// location, so a location change is an automatic miss.
    fn cache_keys(&self) -> Option<CacheKeys> {
        let location = self.locator.locate(MANIFEST_FILE)?;
        let digest = Sha256::digest(location.as_bytes());
        let fingerprint = hex::encode(&digest[..8]);
        Some(CacheKeys {
            table: format!("glyphdex:metadata:{}:icons_data", fingerprint),
            index: format!("glyphdex:metadata:{}:icons_search", fingerprint),
            location,
        })
    }

    fn load_table(&self, location: &str) -> IconTable {
        let text = match fetch_manifest(location) {
            Ok(text) => text,
            Err(e) => {
                warn!("Icon manifest unavailable: {}", e);
                return IconTable::default();
            }
        };

        match IconTable::from_yaml(&text) {
            Ok(table) => {
                debug!("Parsed {} icons from {}", table.len(), location);
                table
            }
            Err(e) => {
                warn!("Icon manifest unusable: {}", e);
                IconTable::default()
            }
        }
    }
}

/// Read the manifest text from a URL or filesystem path.
fn fetch_manifest(location: &str) -> Result<String> {
    if location.starts_with("http://") || location.starts_with("https://") {
        // Built per fetch; fetches are rare (cache misses only) and this
        // keeps the provider free of runtime-bound state.
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("glyphdex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GlyphdexError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        let response = client
            .get(location)
            .send()
            .map_err(|e| GlyphdexError::ManifestUnreadable {
                location: location.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GlyphdexError::ManifestUnreadable {
                location: location.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        response
            .text()
            .map_err(|e| GlyphdexError::ManifestUnreadable {
                location: location.to_string(),
                message: e.to_string(),
            })
    } else {
        std::fs::read_to_string(location).map_err(|e| GlyphdexError::ManifestUnreadable {
            location: location.to_string(),
            message: e.to_string(),
        })
    }
}

fn lock_memo<T>(memo: &Mutex<Option<Arc<T>>>) -> Option<Arc<T>> {
    memo.lock().ok().and_then(|guard| guard.clone())
}

fn store_memo<T>(memo: &Mutex<Option<Arc<T>>>, value: &Arc<T>) {
    if let Ok(mut guard) = memo.lock() {
        *guard = Some(value.clone());
    }
}

fn clear_memo<T>(memo: &Mutex<Option<Arc<T>>>) {
    if let Ok(mut guard) = memo.lock() {
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::settings::{AssetDelivery, MetadataDelivery, Settings};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
house:
  label: Home
  styles: [solid, regular]
  aliases:
    names: [home]
star:
  label: Star
  styles: [solid, regular]
"#;

    fn write_manifest(app_root: &Path, contents: &str) {
        let dir = app_root.join("libraries/fa/metadata");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("icons.yml"), contents).unwrap();
    }

    fn self_hosted_settings() -> Settings {
        let mut settings = Settings::default();
        settings.metadata.delivery = MetadataDelivery::SelfHosted;
        settings.metadata.self_hosted.path = "libraries/fa/metadata".to_string();
        settings
    }

    fn provider_at(app_root: &Path, cache: Option<Arc<dyn MetadataCache>>) -> MetadataProvider {
        let locator = MetadataLocator::new(
            self_hosted_settings(),
            app_root.to_string_lossy().to_string(),
        );
        MetadataProvider::new(locator, cache)
    }

    #[test]
    fn test_icon_table_from_self_hosted_manifest() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let provider = provider_at(temp.path(), None);
        let table = provider.icon_table();

        assert_eq!(table.len(), 2);
        let house = table.get("house").unwrap();
        assert_eq!(house.default_style, "solid");
        assert_eq!(house.aliases.names, vec!["home"]);
    }

    #[test]
    fn test_search_index_follows_table() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let provider = provider_at(temp.path(), None);
        let index = provider.search_index();

        assert_eq!(index.keys_for("hom"), vec!["house"]);
        assert_eq!(index.keys_for("st"), vec!["star"]);
    }

    #[test]
    fn test_missing_manifest_degrades_to_empty() {
        let temp = TempDir::new().unwrap();

        let provider = provider_at(temp.path(), None);
        assert!(provider.icon_table().is_empty());
        assert!(provider.search_index().is_empty());
    }

    #[test]
    fn test_malformed_manifest_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "- this\n- is\n- a sequence\n");

        let provider = provider_at(temp.path(), None);
        assert!(provider.icon_table().is_empty());
        assert!(provider.search_index().is_empty());
    }

    #[test]
    fn test_undetermined_location_degrades_to_empty() {
        let mut settings = Settings::default();
        settings.metadata.delivery = MetadataDelivery::Auto;
        settings.asset.delivery = AssetDelivery::Kit;

        let locator = MetadataLocator::new(settings, "/var/www");
        let provider = MetadataProvider::new(locator, None);

        assert!(provider.icon_table().is_empty());
        assert!(provider.search_index().is_empty());
    }

    #[test]
    fn test_memoizes_table_and_index() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let provider = provider_at(temp.path(), None);
        let first = provider.icon_table();
        let second = provider.icon_table();
        assert!(Arc::ptr_eq(&first, &second));

        let first = provider.search_index();
        let second = provider.search_index();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_results_are_cached_across_providers() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let memory = Arc::new(MemoryCache::new());
        let cache: Arc<dyn MetadataCache> = memory.clone();

        let provider = provider_at(temp.path(), Some(cache.clone()));
        assert_eq!(provider.icon_table().len(), 2);
        assert!(memory.len() >= 1);

        // A fresh provider with the same cache sees the cached table even
        // after the file changes.
        write_manifest(temp.path(), "x:\n  label: X\n  styles: [solid]\n");
        let fresh = provider_at(temp.path(), Some(cache));
        assert_eq!(fresh.icon_table().len(), 2);
    }

    #[test]
    fn test_empty_results_are_not_cached() {
        let temp = TempDir::new().unwrap();

        let memory = Arc::new(MemoryCache::new());
        let cache: Arc<dyn MetadataCache> = memory.clone();

        let provider = provider_at(temp.path(), Some(cache));
        assert!(provider.icon_table().is_empty());
        assert!(provider.search_index().is_empty());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_empty_results_are_not_memoized() {
        let temp = TempDir::new().unwrap();

        let provider = provider_at(temp.path(), None);
        assert!(provider.icon_table().is_empty());

        // The manifest appears later; the provider recovers without a
        // cache clear.
        write_manifest(temp.path(), MANIFEST);
        assert_eq!(provider.icon_table().len(), 2);
    }

    #[test]
    fn test_clear_icon_caches_drops_table_and_index() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let memory = Arc::new(MemoryCache::new());
        let cache: Arc<dyn MetadataCache> = memory.clone();

        let provider = provider_at(temp.path(), Some(cache));
        provider.icon_table();
        provider.search_index();
        assert_eq!(memory.len(), 2);

        write_manifest(temp.path(), "x:\n  label: X\n  styles: [solid]\n");
        provider.clear_icon_caches();
        assert!(memory.is_empty());

        let table = provider.icon_table();
        assert_eq!(table.len(), 1);
        assert!(table.contains("x"));
    }

    #[test]
    fn test_clear_search_caches_keeps_table() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let memory = Arc::new(MemoryCache::new());
        let cache: Arc<dyn MetadataCache> = memory.clone();

        let provider = provider_at(temp.path(), Some(cache));
        provider.icon_table();
        provider.search_index();
        assert_eq!(memory.len(), 2);

        provider.clear_search_caches();
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_location_change_changes_cache_keys() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), MANIFEST);

        let memory = Arc::new(MemoryCache::new());
        let cache: Arc<dyn MetadataCache> = memory.clone();

        let provider = provider_at(temp.path(), Some(cache.clone()));
        provider.icon_table();
        assert_eq!(memory.len(), 1);

        // Same cache, different location: a second entry, not a hit.
        let other = temp.path().join("elsewhere");
        write_manifest(&other, "y:\n  label: Y\n  styles: [solid]\n");
        let moved = provider_at(&other, Some(cache));
        assert_eq!(moved.icon_table().len(), 1);
        assert_eq!(memory.len(), 2);
    }
}
