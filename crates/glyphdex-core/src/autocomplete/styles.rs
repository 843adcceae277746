//! Wrapper-style suggestions for `--fa-*` CSS custom properties.

use std::sync::LazyLock;

use regex::Regex;

use super::Suggestion;

/// CSS custom properties understood by the icon stylesheets, with their
/// documented defaults, in cheat-sheet order. See
/// https://fontawesome.com/docs/web/style/style-cheatsheet.
const STYLE_DEFAULTS: &[(&str, &str)] = &[
    ("--fa-display", "inline-block"),
    ("--fa-inverse", "#fff"),
    ("--fa-li-margin", "0"),
    ("--fa-li-width", "0"),
    ("--fa-rotate-angle", "0"),
    ("--fa-animation-delay", "0s"),
    ("--fa-animation-direction", "normal"),
    ("--fa-animation-duration", "unset"),
    ("--fa-animation-iteration-count", "unset"),
    ("--fa-animation-timing", "unset"),
    ("--fa-beat-scale", "1.5"),
    ("--fa-fade-opacity", "0"),
    ("--fa-beat-fade-opacity", "0"),
    ("--fa-beat-fade-scale", "1.5"),
    ("--fa-flip-x", "0.5"),
    ("--fa-flip-y", "0.5"),
    ("--fa-flip-z", "0.5"),
    ("--fa-flip-angle", ""),
    ("--fa-border-color", "black"),
    ("--fa-border-padding", "0"),
    ("--fa-border-radius", "0"),
    ("--fa-border-style", "solid"),
    ("--fa-border-width", "1px"),
    ("--fa-pull-margin", ".3em"),
    ("--fa-stack-z-index", "auto"),
    ("--fa-primary-color", "#a3adba"),
    ("--fa-primary-opacity", "1.0"),
    ("--fa-secondary-color", "#183153"),
    ("--fa-secondary-opacity", "1.0"),
    ("--fa-font-solid", "normal 900 1em/1 \"Font Awesome 6 Solid\""),
    ("--fa-font-regular", "normal 400 1em/1 \"Font Awesome 6 Regular\""),
    ("--fa-font-light", "normal 300 1em/1 \"Font Awesome 6 Light\""),
    ("--fa-font-thin", "normal 100 1em/1 \"Font Awesome 6 Thin\""),
    ("--fa-font-duotone", "normal 900 1em/1 \"Font Awesome 6 Duotone\""),
    ("--fa-font-brands", "normal 400 1em/1 \"Font Awesome 6 Brands\""),
];

/// Splits a declaration list on `;` and the whitespace around it.
static SEGMENT_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*;\s*").unwrap());

/// Parses the segment being typed: a property with an optional value.
static LAST_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<style>[^:]+)(?:\s*:\s*(?P<value>.+)?\s*)?$").unwrap());

/// Parses a committed `property: value` segment; both parts are required.
static SETTLED_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<style>[^:]+)\s*:\s*(?P<value>.+)\s*$").unwrap());

/// Suggestions for a `;`-separated inline-style declaration list.
///
/// The last segment is the one being typed; segments before it are kept
/// as-is, and the properties they set no longer get suggested. A property
/// matches when the typed property fragment occurs in its name. The
/// completed declaration reuses the typed value when one is present and
/// falls back to the property's default otherwise.
pub fn wrapper_style_suggestions(input: &str) -> Vec<Suggestion> {
    if input.is_empty() {
        return Vec::new();
    }

    let lowered = input.to_lowercase();
    let mut segments: Vec<&str> = SEGMENT_SPLIT.split(&lowered).collect();
    let last = segments.pop().unwrap_or_default();

    let (needle, typed_value) = match LAST_SEGMENT.captures(last) {
        Some(caps) => (
            caps.name("style").map_or(last, |m| m.as_str()),
            caps.name("value").map(|m| m.as_str()),
        ),
        None => (last, None),
    };

    let settled: Vec<&str> = segments
        .iter()
        .filter_map(|segment| SETTLED_SEGMENT.captures(segment))
        .filter_map(|caps| caps.name("style"))
        .map(|m| m.as_str())
        .collect();

    let mut suggestions = Vec::new();
    for &(style, default) in STYLE_DEFAULTS {
        if settled.contains(&style) {
            continue;
        }

        if style.contains(needle) {
            let declaration = format!("{}: {}", style, typed_value.unwrap_or(default));
            let mut parts = segments.clone();
            parts.push(&declaration);
            suggestions.push(Suggestion::from_value(parts.join("; ")));
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(wrapper_style_suggestions("").is_empty());
    }

    #[test]
    fn test_property_fragment_completes_with_default() {
        let suggestions = wrapper_style_suggestions("--fa-disp");
        assert_eq!(values(&suggestions), vec!["--fa-display: inline-block"]);
    }

    #[test]
    fn test_typed_value_is_preserved() {
        let suggestions = wrapper_style_suggestions("--fa-border-color: re");
        assert_eq!(values(&suggestions), vec!["--fa-border-color: re"]);
    }

    #[test]
    fn test_settled_properties_are_excluded() {
        let suggestions = wrapper_style_suggestions("--fa-display: block; --fa-disp");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_committed_segments_are_kept_in_values() {
        let suggestions = wrapper_style_suggestions("--fa-display: block; --fa-beat-s");
        assert_eq!(
            values(&suggestions),
            vec!["--fa-display: block; --fa-beat-scale: 1.5"]
        );
    }

    #[test]
    fn test_empty_last_segment_matches_everything_left() {
        let suggestions = wrapper_style_suggestions("--fa-display: block; ");
        assert_eq!(suggestions.len(), STYLE_DEFAULTS.len() - 1);
        assert_eq!(
            suggestions[0].value,
            "--fa-display: block; --fa-inverse: #fff"
        );
    }

    #[test]
    fn test_empty_default_leaves_value_blank() {
        let suggestions = wrapper_style_suggestions("--fa-flip-angle");
        assert_eq!(values(&suggestions), vec!["--fa-flip-angle: "]);
    }

    #[test]
    fn test_defaults_keep_their_case() {
        // Input is lowercased, defaults are not.
        let suggestions = wrapper_style_suggestions("--FA-FONT-SO");
        assert_eq!(
            values(&suggestions),
            vec!["--fa-font-solid: normal 900 1em/1 \"Font Awesome 6 Solid\""]
        );
    }

    #[test]
    fn test_match_keeps_table_order() {
        let suggestions = wrapper_style_suggestions("--fa-border-");
        assert_eq!(
            values(&suggestions),
            vec![
                "--fa-border-color: black",
                "--fa-border-padding: 0",
                "--fa-border-radius: 0",
                "--fa-border-style: solid",
                "--fa-border-width: 1px",
            ]
        );
    }

    #[test]
    fn test_unparseable_last_segment_matches_nothing() {
        assert!(wrapper_style_suggestions(":").is_empty());
    }

    #[test]
    fn test_unparseable_committed_segments_are_kept_verbatim() {
        let suggestions = wrapper_style_suggestions("garbage; --fa-stack");
        assert_eq!(values(&suggestions), vec!["garbage; --fa-stack-z-index: auto"]);
    }
}
