//! Suggestion builders for icon pickers and settings forms.
//!
//! Each builder takes the raw text typed so far and returns the matching
//! completions. Inputs are treated as whitespace-separated words (or
//! `;`-separated segments for inline CSS) where only the trailing part is
//! still being typed; everything before it is kept verbatim in the
//! suggested values.

use serde::{Deserialize, Serialize};

mod classes;
mod icon;
mod query;
mod styles;
mod uris;

pub use classes::wrapper_class_suggestions;
pub use icon::icon_suggestions;
pub use query::{filter_by_word, last_word, split_last, words};
pub use styles::wrapper_style_suggestions;
pub use uris::{
    asset_cdn_uri_suggestions, metadata_cdn_uri_suggestions, self_hosted_path_suggestions,
};

/// One autocomplete match.
///
/// `value` is what gets written into the field when picked; `label` is what
/// the dropdown shows and may carry extra markup such as icon previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub value: String,
    pub label: String,
}

impl Suggestion {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// A suggestion whose label is the value itself.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}
