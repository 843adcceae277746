//! Settings substitution in bundle definition documents.
//!
//! Bundle definitions are YAML documents whose strings may reference
//! settings as `$dotted.key` or `${dotted.key}`, e.g.
//! `$asset.cdn.uri/css/all.css`. Expansion rewrites every string value
//! and string mapping key in place.

use regex::{NoExpand, Regex};
use serde_yaml_ng::Value;

use crate::error::{GlyphdexError, Result};
use crate::settings::Settings;

/// Nesting deeper than this is left untouched.
const MAX_DEPTH: usize = 64;

/// Expand `$dotted.key` settings references in a definition document.
///
/// Only string leaves of the settings participate; booleans and nested
/// tables do not. Replacement is literal, and a reference only matches on
/// a word boundary, so `$asset.version` does not fire inside
/// `$asset.versions`.
pub fn expand_definitions(document: &mut Value, settings: &Settings) -> Result<()> {
    let patterns = substitution_patterns(settings)?;
    substitute(document, &patterns, 0);
    Ok(())
}

/// Dotted-key string leaves of the settings, in declaration order.
pub fn dotted_string_leaves(settings: &Settings) -> Result<Vec<(String, String)>> {
    let value = serde_yaml_ng::to_value(settings).map_err(|e| GlyphdexError::Yaml {
        message: "settings are not representable as a mapping".to_string(),
        source: Some(e),
    })?;

    let mut leaves = Vec::new();
    collect_string_leaves(&value, "", &mut leaves);
    Ok(leaves)
}

fn collect_string_leaves(value: &Value, parents: &str, leaves: &mut Vec<(String, String)>) {
    let Value::Mapping(map) = value else {
        return;
    };

    for (key, item) in map {
        let Value::String(name) = key else {
            continue;
        };
        if parents.is_empty() && name.starts_with('_') {
            continue;
        }

        let path = if parents.is_empty() {
            name.clone()
        } else {
            format!("{parents}.{name}")
        };

        match item {
            Value::String(text) => leaves.push((path, text.clone())),
            Value::Mapping(_) => collect_string_leaves(item, &path, leaves),
            _ => {}
        }
    }
}

fn substitution_patterns(settings: &Settings) -> Result<Vec<(Regex, String)>> {
    let mut patterns = Vec::new();
    for (key, replacement) in dotted_string_leaves(settings)? {
        let escaped = regex::escape(&key);
        let pattern = format!(r"(?:\${escaped}\b)|(?:\$\{{{escaped}\}})");
        let regex = Regex::new(&pattern).map_err(|e| {
            GlyphdexError::Other(format!("bad substitution pattern for {key}: {e}"))
        })?;
        patterns.push((regex, replacement));
    }

    Ok(patterns)
}

fn apply_patterns(text: &str, patterns: &[(Regex, String)]) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in patterns {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, NoExpand(replacement)).into_owned();
        }
    }
    out
}

fn substitute(value: &mut Value, patterns: &[(Regex, String)], depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::String(text) => {
            *text = apply_patterns(text, patterns);
        }
        Value::Sequence(items) => {
            for item in items {
                substitute(item, patterns, depth + 1);
            }
        }
        Value::Mapping(map) => {
            let keys: Vec<Value> = map.keys().cloned().collect();
            for key in keys {
                let Value::String(name) = &key else {
                    continue;
                };
                let replaced = apply_patterns(name, patterns);
                if replaced != *name {
                    if let Some(item) = map.remove(&key) {
                        map.insert(Value::String(replaced), item);
                    }
                }
            }

            for (_, item) in map.iter_mut() {
                substitute(item, patterns, depth + 1);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_string_leaves_skip_non_strings() {
        let leaves = dotted_string_leaves(&Settings::default()).unwrap();
        let keys: Vec<&str> = leaves.iter().map(|(k, _)| k.as_str()).collect();

        assert!(keys.contains(&"method"));
        assert!(keys.contains(&"asset.delivery"));
        assert!(keys.contains(&"asset.version"));
        assert!(keys.contains(&"asset.cdn.uri"));
        assert!(keys.contains(&"metadata.self.path"));
        // Style toggles are booleans.
        assert!(!keys.contains(&"asset.use.solid"));
        assert!(!keys.contains(&"asset.use"));
    }

    #[test]
    fn test_expand_string_values() {
        let mut document = doc("remote: $asset.cdn.uri/css/all.css");
        expand_definitions(&mut document, &Settings::default()).unwrap();
        assert_eq!(
            document["remote"],
            Value::from("https://use.fontawesome.com/releases/v6.1.1/css/all.css")
        );
    }

    #[test]
    fn test_expand_braced_references() {
        let mut document = doc("remote: ${asset.cdn.uri}/js/all.js");
        expand_definitions(&mut document, &Settings::default()).unwrap();
        assert_eq!(
            document["remote"],
            Value::from("https://use.fontawesome.com/releases/v6.1.1/js/all.js")
        );
    }

    #[test]
    fn test_references_stop_at_word_boundaries() {
        let mut document = doc("version: v$asset.version\nother: $asset.versions");
        expand_definitions(&mut document, &Settings::default()).unwrap();
        assert_eq!(document["version"], Value::from("v6.1.1"));
        assert_eq!(document["other"], Value::from("$asset.versions"));
    }

    #[test]
    fn test_expand_mapping_keys() {
        let mut document = doc("$asset.delivery.svg.all:\n  remote: $asset.cdn.uri");
        expand_definitions(&mut document, &Settings::default()).unwrap();
        assert_eq!(
            document["self.svg.all"]["remote"],
            Value::from("https://use.fontawesome.com/releases/v6.1.1")
        );
    }

    #[test]
    fn test_expand_inside_sequences() {
        let mut document = doc("files:\n  - $asset.self.path/css/all.css\n  - plain.css");
        expand_definitions(&mut document, &Settings::default()).unwrap();
        assert_eq!(
            document["files"][0],
            Value::from("libraries/fortawesome--fontawesome-free/css/all.css")
        );
        assert_eq!(document["files"][1], Value::from("plain.css"));
    }

    #[test]
    fn test_depth_cap_leaves_deep_strings_alone() {
        let mut inner = Value::from("$method");
        for _ in 0..70 {
            let mut map = serde_yaml_ng::Mapping::new();
            map.insert(Value::from("child"), inner);
            inner = Value::Mapping(map);
        }

        let mut document = inner;
        expand_definitions(&mut document, &Settings::default()).unwrap();

        let mut cursor = &document;
        for _ in 0..70 {
            cursor = &cursor["child"];
        }
        assert_eq!(*cursor, Value::from("$method"));
    }
}
