//! Icon manifest parsing.
//!
//! The manifest is a YAML mapping of icon name to metadata:
//!
//! ```yaml
//! house:
//!   label: Home
//!   styles: [solid, regular]
//!   aliases:
//!     names: [home]
//! ```
//!
//! Upstream manifests carry many more fields per icon (unicode, changes,
//! search terms); everything beyond label, styles and alias names is
//! ignored.

use crate::error::{GlyphdexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Alternate names for an icon.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IconAliases {
    #[serde(default)]
    pub names: Vec<String>,
}

/// One icon from the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconRecord {
    /// Canonical icon name, the manifest key.
    pub name: String,
    /// First listed style, used as the representative default.
    #[serde(rename = "type")]
    pub default_style: String,
    /// Human-readable display name.
    pub label: String,
    /// Styles the icon ships in, in manifest order. Never empty.
    pub styles: Vec<String>,
    #[serde(default)]
    pub aliases: IconAliases,
}

/// Raw manifest entry as found in the YAML document. Only the fields we
/// care about; unknown fields are ignored.
#[derive(Debug, Deserialize, Default)]
struct RawIconEntry {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    styles: Vec<String>,
    #[serde(default)]
    aliases: RawAliases,
}

#[derive(Debug, Deserialize, Default)]
struct RawAliases {
    #[serde(default)]
    names: Vec<String>,
}

/// The parsed icon catalog, keyed by canonical icon name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconTable {
    #[serde(flatten)]
    icons: HashMap<String, IconRecord>,
}

impl IconTable {
    /// Parse a manifest document.
    ///
    /// Entries without a non-empty label or without at least one style
    /// are dropped without error; a document that is not a mapping at
    /// all is malformed.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let doc: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(text).map_err(|e| GlyphdexError::ManifestMalformed {
                message: e.to_string(),
                source: Some(e),
            })?;

        let mapping = match doc {
            serde_yaml_ng::Value::Mapping(mapping) => mapping,
            serde_yaml_ng::Value::Null => return Ok(IconTable::default()),
            other => {
                return Err(GlyphdexError::ManifestMalformed {
                    message: format!("expected a mapping document, got {}", value_kind(&other)),
                    source: None,
                })
            }
        };

        let mut icons = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Some(name) = key.as_str().map(str::to_string) else {
                trace!("Skipping manifest entry with non-string key");
                continue;
            };

            // A mangled entry drops that icon, not the whole manifest.
            let raw: RawIconEntry = match serde_yaml_ng::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    trace!("Skipping unparseable manifest entry '{}': {}", name, e);
                    continue;
                }
            };

            let Some(label) = raw.label.filter(|l| !l.is_empty()) else {
                continue;
            };
            let Some(default_style) = raw.styles.first().cloned() else {
                continue;
            };

            icons.insert(
                name.clone(),
                IconRecord {
                    name,
                    default_style,
                    label,
                    styles: raw.styles,
                    aliases: IconAliases {
                        names: raw.aliases.names,
                    },
                },
            );
        }

        Ok(IconTable { icons })
    }

    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        self.icons.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IconRecord)> {
        self.icons.iter()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl FromIterator<IconRecord> for IconTable {
    fn from_iter<I: IntoIterator<Item = IconRecord>>(iter: I) -> Self {
        IconTable {
            icons: iter
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect(),
        }
    }
}

fn value_kind(value: &serde_yaml_ng::Value) -> &'static str {
    match value {
        serde_yaml_ng::Value::Null => "null",
        serde_yaml_ng::Value::Bool(_) => "a boolean",
        serde_yaml_ng::Value::Number(_) => "a number",
        serde_yaml_ng::Value::String(_) => "a string",
        serde_yaml_ng::Value::Sequence(_) => "a sequence",
        serde_yaml_ng::Value::Mapping(_) => "a mapping",
        serde_yaml_ng::Value::Tagged(_) => "a tagged value",
    }
}
