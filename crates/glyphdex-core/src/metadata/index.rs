//! Prefix-search index over icon names and aliases.

use crate::metadata::IconTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Maps every icon name, alias, and proper prefix of either to the set
/// of canonical icon keys it resolves to.
///
/// Lookup is verbatim: the caller lowercases and tokenizes, the index
/// does exact key matching only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchIndex {
    #[serde(flatten)]
    terms: HashMap<String, BTreeSet<String>>,
}

impl SearchIndex {
    /// Build the index from an icon table.
    ///
    /// First pass registers every full name and alias against its
    /// canonical key. Second pass walks a snapshot of those full-name
    /// buckets and unions each bucket's resolved key set into every
    /// proper prefix of the name. Unioning the resolved set (rather
    /// than just the one key) keeps prefix buckets complete when names
    /// overlap, independent of iteration order.
    pub fn build(table: &IconTable) -> Self {
        let mut terms: HashMap<String, BTreeSet<String>> = HashMap::new();

        for (key, record) in table.iter() {
            let names = std::iter::once(record.name.as_str())
                .chain(record.aliases.names.iter().map(String::as_str));
            for name in names {
                terms
                    .entry(name.to_string())
                    .or_default()
                    .insert(key.clone());
            }
        }

        let full_names: Vec<(String, BTreeSet<String>)> = terms
            .iter()
            .map(|(name, keys)| (name.clone(), keys.clone()))
            .collect();

        for (name, keys) in full_names {
            // Prefix slicing is by code point so multi-byte names index
            // correctly.
            let chars: Vec<char> = name.chars().collect();
            let mut prefix = String::with_capacity(name.len());
            for &ch in &chars[..chars.len().saturating_sub(1)] {
                prefix.push(ch);
                terms
                    .entry(prefix.clone())
                    .or_default()
                    .extend(keys.iter().cloned());
            }
        }

        SearchIndex { terms }
    }

    /// Exact lookup of a search token.
    pub fn lookup(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.terms.get(token)
    }

    /// Icon keys for a token, empty when the token is unregistered.
    pub fn keys_for(&self, token: &str) -> Vec<&str> {
        self.terms
            .get(token)
            .map(|keys| keys.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
