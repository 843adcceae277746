//! Icon markup construction helpers.

use crate::metadata::IconTable;

/// Style-name to short CSS class aliases used by Font Awesome.
const STYLE_CLASS_ALIASES: &[(&str, &str)] = &[
    ("solid", "fas"),
    ("regular", "far"),
    ("light", "fal"),
    ("thin", "fat"),
    ("duotone", "fad"),
    ("brands", "fab"),
];

/// Styles offered when no metadata is available to narrow them down.
const FALLBACK_STYLES: &[&str] = &["solid", "regular", "light", "duotone", "thin", "brands"];

/// Map a style name to its CSS class.
///
/// The well-known styles map to their short aliases ("solid" → "fas"),
/// an empty style falls back to "fas", and anything else becomes
/// "fa-{style}".
pub fn css_style_class(style: &str) -> String {
    if style.is_empty() {
        return "fas".to_string();
    }

    match STYLE_CLASS_ALIASES.iter().find(|(name, _)| *name == style) {
        Some((_, class)) => (*class).to_string(),
        None => format!("fa-{style}"),
    }
}

/// Everything needed to render one icon element.
///
/// Field defaults mirror the values an icon picker falls back to when a
/// field was never filled in: empty icon and style, an `i` wrapper and no
/// extra classes or inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    /// Icon name without the `fa-` prefix, e.g. `house`.
    pub icon: String,
    /// Style name, e.g. `solid`.
    pub style: String,
    /// Wrapping HTML element, `i` or `span`.
    pub wrapper: String,
    /// Extra space-separated CSS classes for the wrapper.
    pub wrapper_class: String,
    /// Inline CSS for the wrapper's `style` attribute.
    pub wrapper_style: String,
}

impl Default for IconSpec {
    fn default() -> Self {
        Self {
            icon: String::new(),
            style: String::new(),
            wrapper: "i".to_string(),
            wrapper_class: String::new(),
            wrapper_style: String::new(),
        }
    }
}

/// Compute the CSS class list for an icon.
///
/// Returns an empty list unless both the icon name and the style are
/// non-empty. Extra wrapper classes are appended after the style and icon
/// classes.
pub fn icon_classes(spec: &IconSpec) -> Vec<String> {
    if spec.icon.is_empty() || spec.style.is_empty() {
        return Vec::new();
    }

    let mut classes = vec![css_style_class(&spec.style), format!("fa-{}", spec.icon)];
    classes.extend(spec.wrapper_class.split_whitespace().map(str::to_string));
    classes
}

/// Render an icon as an HTML snippet, e.g.
/// `<i class="fas fa-house fa-fw"></i>`.
///
/// Without an icon or a style the wrapper element is rendered bare; the
/// `style` attribute is only emitted alongside the classes.
pub fn render_icon(spec: &IconSpec) -> String {
    let wrapper = if spec.wrapper.is_empty() {
        "i"
    } else {
        spec.wrapper.as_str()
    };

    let classes = icon_classes(spec);
    let mut attributes = String::new();
    if !classes.is_empty() {
        attributes.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        if !spec.wrapper_style.is_empty() {
            attributes.push_str(&format!(" style=\"{}\"", spec.wrapper_style));
        }
    }

    format!("<{wrapper}{attributes}></{wrapper}>")
}

/// Style choices for one icon, as `(value, label)` pairs in the order the
/// metadata lists them. Empty when the icon key is empty or unknown.
pub fn style_options(table: &IconTable, icon_key: &str) -> Vec<(String, String)> {
    let mut options = Vec::new();
    if !icon_key.is_empty() {
        if let Some(record) = table.get(icon_key) {
            for style in &record.styles {
                options.push((style.clone(), capitalize(style)));
            }
        }
    }

    options
}

/// Style choices to offer when no metadata is available.
pub fn fallback_style_options() -> Vec<(String, String)> {
    FALLBACK_STYLES
        .iter()
        .map(|style| (style.to_string(), capitalize(style)))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::IconRecord;

    fn test_table() -> IconTable {
        IconTable::from_iter([
            IconRecord {
                name: "house".to_string(),
                default_style: "solid".to_string(),
                label: "House".to_string(),
                styles: vec!["solid".to_string(), "brands".to_string()],
                aliases: Default::default(),
            },
            IconRecord {
                name: "bell".to_string(),
                default_style: "solid".to_string(),
                label: "Bell".to_string(),
                styles: vec!["solid".to_string()],
                aliases: Default::default(),
            },
        ])
    }

    #[test]
    fn test_css_style_class_aliases() {
        assert_eq!(css_style_class("solid"), "fas");
        assert_eq!(css_style_class("regular"), "far");
        assert_eq!(css_style_class("light"), "fal");
        assert_eq!(css_style_class("thin"), "fat");
        assert_eq!(css_style_class("duotone"), "fad");
        assert_eq!(css_style_class("brands"), "fab");
    }

    #[test]
    fn test_css_style_class_empty_defaults_to_solid() {
        assert_eq!(css_style_class(""), "fas");
    }

    #[test]
    fn test_css_style_class_unknown_gets_prefix() {
        assert_eq!(css_style_class("sharp"), "fa-sharp");
        assert_eq!(css_style_class("custom"), "fa-custom");
    }

    #[test]
    fn test_icon_classes_full() {
        let spec = IconSpec {
            icon: "house".to_string(),
            style: "solid".to_string(),
            wrapper_class: "fa-fw fa-2x".to_string(),
            ..Default::default()
        };
        assert_eq!(icon_classes(&spec), vec!["fas", "fa-house", "fa-fw", "fa-2x"]);
    }

    #[test]
    fn test_icon_classes_require_icon_and_style() {
        let no_icon = IconSpec {
            style: "solid".to_string(),
            wrapper_class: "fa-fw".to_string(),
            ..Default::default()
        };
        assert!(icon_classes(&no_icon).is_empty());

        let no_style = IconSpec {
            icon: "house".to_string(),
            wrapper_class: "fa-fw".to_string(),
            ..Default::default()
        };
        assert!(icon_classes(&no_style).is_empty());
    }

    #[test]
    fn test_render_icon_snippet() {
        let spec = IconSpec {
            icon: "house".to_string(),
            style: "solid".to_string(),
            wrapper_class: "fa-fw".to_string(),
            wrapper_style: "--fa-rotate-angle: 45deg;".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_icon(&spec),
            "<i class=\"fas fa-house fa-fw\" style=\"--fa-rotate-angle: 45deg;\"></i>"
        );
    }

    #[test]
    fn test_render_icon_span_wrapper() {
        let spec = IconSpec {
            icon: "bell".to_string(),
            style: "regular".to_string(),
            wrapper: "span".to_string(),
            ..Default::default()
        };
        assert_eq!(render_icon(&spec), "<span class=\"far fa-bell\"></span>");
    }

    #[test]
    fn test_render_icon_bare_without_icon() {
        let spec = IconSpec {
            wrapper_style: "color: red;".to_string(),
            ..Default::default()
        };
        assert_eq!(render_icon(&spec), "<i></i>");
    }

    #[test]
    fn test_style_options_follow_record_order() {
        let table = test_table();
        assert_eq!(
            style_options(&table, "house"),
            vec![
                ("solid".to_string(), "Solid".to_string()),
                ("brands".to_string(), "Brands".to_string()),
            ]
        );
        assert_eq!(
            style_options(&table, "bell"),
            vec![("solid".to_string(), "Solid".to_string())]
        );
    }

    #[test]
    fn test_style_options_unknown_or_empty_key() {
        let table = test_table();
        assert!(style_options(&table, "rocket").is_empty());
        assert!(style_options(&table, "").is_empty());
    }

    #[test]
    fn test_fallback_style_options() {
        let options = fallback_style_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0], ("solid".to_string(), "Solid".to_string()));
        assert_eq!(options[3], ("duotone".to_string(), "Duotone".to_string()));
    }
}
