//! Icon metadata: location, parsing, indexing, and cached access.
//!
//! The pipeline runs locator -> manifest -> index:
//! - [`MetadataLocator`] turns delivery settings into a manifest path or URL
//! - [`IconTable`] parses the YAML manifest into the icon catalog
//! - [`SearchIndex`] derives the prefix-search structure for autocomplete
//! - [`MetadataProvider`] drives the pipeline and caches the results

mod index;
mod locator;
mod manifest;
mod provider;

pub use index::SearchIndex;
pub use locator::MetadataLocator;
pub use manifest::{IconAliases, IconRecord, IconTable};
pub use provider::{MetadataProvider, MANIFEST_FILE, SETTINGS_CACHE_TAG};
