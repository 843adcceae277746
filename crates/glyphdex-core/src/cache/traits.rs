//! Cache backend trait.

/// Tag-aware key-value cache for metadata payloads.
///
/// The port is deliberately infallible: callers treat a failed read as a
/// miss and a failed write as a no-op, so backends log their own errors
/// instead of propagating them. Construction is where failures surface.
///
/// Tags group entries for bulk invalidation. An entry is removed when any
/// of its tags is invalidated, so storing an entry with its dependencies'
/// tags plus its own makes invalidation cascade.
pub trait MetadataCache: Send + Sync {
    /// Get cached data by key. `None` on miss or backend failure.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store data under a key with the given tags.
    ///
    /// Overwrites any existing entry, replacing its tags.
    fn set(&self, key: &str, value: &[u8], tags: &[&str]);

    /// Remove every entry carrying at least one of the given tags.
    fn invalidate_tags(&self, tags: &[&str]);
}
