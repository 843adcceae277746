//! Well-known endpoint suggestions for the settings form.

use super::{query, Suggestion};

/// CDN base URIs known to serve a given release of the icon assets.
pub fn asset_cdn_uri_suggestions(input: &str, version: &str) -> Vec<Suggestion> {
    let candidates = [
        format!("https://use.fontawesome.com/releases/v{version}"),
        format!("https://cdnjs.cloudflare.com/ajax/libs/font-awesome/{version}"),
        format!("https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@{version}"),
    ];

    filter_candidates(input, &candidates)
}

/// CDN base URIs known to serve the metadata of a given release.
pub fn metadata_cdn_uri_suggestions(input: &str, version: &str) -> Vec<Suggestion> {
    let candidates = [format!(
        "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@{version}/metadata"
    )];

    filter_candidates(input, &candidates)
}

/// Self-hosted paths are free-form, so there is nothing to suggest.
pub fn self_hosted_path_suggestions(_input: &str) -> Vec<Suggestion> {
    Vec::new()
}

fn filter_candidates(input: &str, candidates: &[String]) -> Vec<Suggestion> {
    let Some(word) = query::last_word(input) else {
        return Vec::new();
    };

    query::filter_by_word(&word, candidates.iter().map(String::as_str))
        .into_iter()
        .map(Suggestion::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_all_asset_uris_carry_the_version() {
        let suggestions = asset_cdn_uri_suggestions("https", "6.1.1");
        assert_eq!(
            values(&suggestions),
            vec![
                "https://use.fontawesome.com/releases/v6.1.1",
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.1.1",
                "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.1.1",
            ]
        );
    }

    #[test]
    fn test_substring_narrows_asset_uris() {
        let suggestions = asset_cdn_uri_suggestions("jsdelivr", "6.1.1");
        assert_eq!(
            values(&suggestions),
            vec!["https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.1.1"]
        );
    }

    #[test]
    fn test_metadata_uri() {
        let suggestions = metadata_cdn_uri_suggestions("cdn", "6.1.1");
        assert_eq!(
            values(&suggestions),
            vec!["https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.1.1/metadata"]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(asset_cdn_uri_suggestions("", "6.1.1").is_empty());
        assert!(asset_cdn_uri_suggestions("  ", "6.1.1").is_empty());
        assert!(metadata_cdn_uri_suggestions("", "6.1.1").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(asset_cdn_uri_suggestions("example.org", "6.1.1").is_empty());
    }

    #[test]
    fn test_self_hosted_paths_have_no_suggestions() {
        assert!(self_hosted_path_suggestions("libraries/").is_empty());
    }

    #[test]
    fn test_labels_mirror_values() {
        let suggestions = metadata_cdn_uri_suggestions("metadata", "6.2.0");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, suggestions[0].label);
        assert!(suggestions[0].value.ends_with("fontawesome-free@6.2.0/metadata"));
    }
}
