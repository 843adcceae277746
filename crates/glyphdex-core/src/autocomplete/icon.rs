//! Icon-name suggestions backed by the prefix search index.

use super::{query, Suggestion};
use crate::markup::css_style_class;
use crate::metadata::{IconTable, SearchIndex};

/// Suggestions for a partially typed icon name.
///
/// The last word of `input` is looked up verbatim in the index; every
/// matched icon key yields one suggestion. The label is the key followed
/// by one fixed-width preview snippet per style of the icon, so pickers
/// can render the choices visually.
///
/// Keys the index knows but the table does not are skipped.
pub fn icon_suggestions(input: &str, table: &IconTable, index: &SearchIndex) -> Vec<Suggestion> {
    let Some(word) = query::last_word(input) else {
        return Vec::new();
    };

    let Some(keys) = index.lookup(&word) else {
        return Vec::new();
    };

    let mut suggestions = Vec::new();
    for key in keys {
        let Some(record) = table.get(key) else {
            continue;
        };

        let previews: Vec<String> = record
            .styles
            .iter()
            .map(|style| format!("<i class=\"{} fa-{} fa-fw\"></i>", css_style_class(style), key))
            .collect();

        suggestions.push(Suggestion::new(
            key.clone(),
            format!("{} {}", key, previews.join(" ")),
        ));
    }

    suggestions
}
