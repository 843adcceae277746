//! Cache layer for parsed metadata.
//!
//! The icon table and search index are expensive to rebuild, so the
//! metadata provider stores them through this layer:
//! - [`SqliteCache`] for persistence across processes
//! - [`MemoryCache`] for single-process use and tests
//!
//! Entries carry tags; invalidating a tag removes every entry that has it.

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::MetadataCache;
