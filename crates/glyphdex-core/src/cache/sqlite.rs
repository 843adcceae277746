//! SQLite-based cache backend.

use crate::cache::MetadataCache;
use crate::error::{GlyphdexError, Result};
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Persistent cache backend with tag-based invalidation.
///
/// Entries have no TTL; they live until one of their tags is invalidated
/// or the key is overwritten. Thread-safe via internal mutex on the
/// connection.
pub struct SqliteCache {
    /// Database connection (wrapped for thread safety).
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCache {
    /// Create a new cache at the specified database path.
    ///
    /// Creates the database and tables if they don't exist.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GlyphdexError::Io {
                message: format!("Failed to create cache directory: {}", e),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| GlyphdexError::Database {
            message: format!("Failed to open cache database: {}", e),
            source: Some(e),
        })?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| GlyphdexError::Database {
                message: format!("Failed to set pragmas: {}", e),
                source: Some(e),
            })?;

        let cache = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        cache.init_schema()?;

        Ok(cache)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                cached_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cache_tags (
                key TEXT NOT NULL,
                tag TEXT NOT NULL,
                PRIMARY KEY (key, tag)
            );

            -- Index for invalidation queries
            CREATE INDEX IF NOT EXISTS idx_cache_tags_tag
                ON cache_tags(tag);
            "#,
        )
        .map_err(|e| GlyphdexError::Database {
            message: format!("Failed to initialize cache schema: {}", e),
            source: Some(e),
        })?;

        Ok(())
    }

    /// Number of live entries. Used by tests and diagnostics.
    pub fn entry_count(&self) -> Result<usize> {
        let conn = self.conn.lock().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |row| row.get(0))
            .map_err(|e| GlyphdexError::Database {
                message: format!("Failed to count cache entries: {}", e),
                source: Some(e),
            })?;

        Ok(count as usize)
    }

    fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })?;

        let value: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| GlyphdexError::Database {
                message: format!("Failed to query cache entry: {}", e),
                source: Some(e),
            })?;

        Ok(value)
    }

    fn try_set(&self, key: &str, value: &[u8], tags: &[&str]) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })?;

        let tx = conn.transaction().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to begin cache transaction: {}", e),
            source: Some(e),
        })?;

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, cached_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )
        .map_err(|e| GlyphdexError::Database {
            message: format!("Failed to set cache entry: {}", e),
            source: Some(e),
        })?;

        // Overwriting an entry replaces its tags
        tx.execute("DELETE FROM cache_tags WHERE key = ?1", params![key])
            .map_err(|e| GlyphdexError::Database {
                message: format!("Failed to clear cache tags: {}", e),
                source: Some(e),
            })?;

        {
            let mut stmt = tx
                .prepare("INSERT OR IGNORE INTO cache_tags (key, tag) VALUES (?1, ?2)")
                .map_err(|e| GlyphdexError::Database {
                    message: format!("Failed to prepare tag insert: {}", e),
                    source: Some(e),
                })?;
            for tag in tags {
                stmt.execute(params![key, tag])
                    .map_err(|e| GlyphdexError::Database {
                        message: format!("Failed to insert cache tag: {}", e),
                        source: Some(e),
                    })?;
            }
        }

        tx.commit().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to commit cache transaction: {}", e),
            source: Some(e),
        })?;

        Ok(())
    }

    fn try_invalidate(&self, tags: &[&str]) -> Result<usize> {
        if tags.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.lock().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })?;

        let tx = conn.transaction().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to begin cache transaction: {}", e),
            source: Some(e),
        })?;

        let placeholders = vec!["?"; tags.len()].join(", ");
        let keys: Vec<String> = {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT DISTINCT key FROM cache_tags WHERE tag IN ({})",
                    placeholders
                ))
                .map_err(|e| GlyphdexError::Database {
                    message: format!("Failed to prepare invalidation query: {}", e),
                    source: Some(e),
                })?;

            let keys = stmt
                .query_map(params_from_iter(tags.iter()), |row| row.get(0))
                .map_err(|e| GlyphdexError::Database {
                    message: format!("Failed to query tagged entries: {}", e),
                    source: Some(e),
                })?
                .filter_map(|r| r.ok())
                .collect();
            keys
        };

        for key in &keys {
            tx.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])
                .map_err(|e| GlyphdexError::Database {
                    message: format!("Failed to invalidate cache entry: {}", e),
                    source: Some(e),
                })?;
            tx.execute("DELETE FROM cache_tags WHERE key = ?1", params![key])
                .map_err(|e| GlyphdexError::Database {
                    message: format!("Failed to remove cache tags: {}", e),
                    source: Some(e),
                })?;
        }

        tx.commit().map_err(|e| GlyphdexError::Database {
            message: format!("Failed to commit cache transaction: {}", e),
            source: Some(e),
        })?;

        Ok(keys.len())
    }
}

impl MetadataCache for SqliteCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &[u8], tags: &[&str]) {
        if let Err(e) = self.try_set(key, value, tags) {
            warn!("Cache write failed for '{}': {}", key, e);
        }
    }

    fn invalidate_tags(&self, tags: &[&str]) {
        match self.try_invalidate(tags) {
            Ok(count) => {
                if count > 0 {
                    debug!("Invalidated {} cache entries for tags {:?}", count, tags);
                }
            }
            Err(e) => warn!("Cache invalidation failed for tags {:?}: {}", tags, e),
        }
    }
}
