//! In-memory cache backend.

use crate::cache::MetadataCache;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::warn;

struct StoredEntry {
    value: Vec<u8>,
    tags: HashSet<String>,
}

/// Process-local cache backed by a `HashMap`.
///
/// Used when no persistent cache is configured, and in tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).map(|e| e.value.clone()),
            Err(_) => {
                warn!("Memory cache mutex poisoned, treating get as miss");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &[u8], tags: &[&str]) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(
                    key.to_string(),
                    StoredEntry {
                        value: value.to_vec(),
                        tags: tags.iter().map(|t| t.to_string()).collect(),
                    },
                );
            }
            Err(_) => warn!("Memory cache mutex poisoned, dropping write for {key}"),
        }
    }

    fn invalidate_tags(&self, tags: &[&str]) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.retain(|_, entry| !tags.iter().any(|t| entry.tags.contains(*t)));
            }
            Err(_) => warn!("Memory cache mutex poisoned, skipping invalidation"),
        }
    }
}
