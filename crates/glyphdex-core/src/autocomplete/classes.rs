//! Wrapper-class suggestions from the style cheat sheet.

use std::collections::HashSet;

use super::{query, Suggestion};

/// Utility classes and the styling group each belongs to, in cheat-sheet
/// order. See https://fontawesome.com/docs/web/style/style-cheatsheet.
///
/// Only one class per styling group makes sense on a single icon, so a
/// committed class rules out the rest of its group. The list classes
/// (`fa-ul`, `fa-li`) apply to surrounding markup rather than the icon
/// itself and are left out.
const CLASS_STYLINGS: &[(&str, &str)] = &[
    ("fa-inverse", "general"),
    ("fa-1x", "sizing"),
    ("fa-2x", "sizing"),
    ("fa-3x", "sizing"),
    ("fa-4x", "sizing"),
    ("fa-5x", "sizing"),
    ("fa-6x", "sizing"),
    ("fa-7x", "sizing"),
    ("fa-8x", "sizing"),
    ("fa-9x", "sizing"),
    ("fa-10x", "sizing"),
    ("fa-2xs", "sizing"),
    ("fa-xs", "sizing"),
    ("fa-sm", "sizing"),
    ("fa-lg", "sizing"),
    ("fa-xl", "sizing"),
    ("fa-2xl", "sizing"),
    ("fa-fw", "fixed"),
    ("fa-rotate-90", "rotating"),
    ("fa-rotate-180", "rotating"),
    ("fa-rotate-270", "rotating"),
    ("fa-flip-horizontal", "rotating"),
    ("fa-flip-vertical", "rotating"),
    ("fa-flip-both", "rotating"),
    ("fa-rotate-by", "rotating"),
    ("fa-spin", "animating"),
    ("fa-spin-pulse", "animating"),
    ("fa-spin-reverse", "animating-spin-direction"),
    ("fa-beat", "animating"),
    ("fa-fade", "animating"),
    ("fa-flip", "animating"),
    ("fa-border", "bordered"),
    ("fa-pull-left", "pulled"),
    ("fa-pull-right", "pulled"),
    ("fa-stack-1x", "stacking"),
    ("fa-stack-2x", "stacking"),
    ("fa-swap-opacity", "duotone"),
    ("fa-sr-only", "accessibility"),
    ("fa-sr-only-focusable", "accessibility"),
];

fn styling_of(class: &str) -> Option<&'static str> {
    CLASS_STYLINGS
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, styling)| *styling)
}

/// Suggestions for a space-separated wrapper-class list.
///
/// The last word is the one being typed; the words before it are kept
/// as-is and also decide which styling groups are already taken. A class
/// matches when the typed word occurs in the class name or in its styling
/// group name, and its group is not yet covered by a committed class.
pub fn wrapper_class_suggestions(input: &str) -> Vec<Suggestion> {
    let (committed, Some(last)) = query::split_last(input) else {
        return Vec::new();
    };

    let taken: HashSet<&str> = committed
        .iter()
        .filter_map(|word| styling_of(word))
        .collect();

    let prefix = if committed.is_empty() {
        String::new()
    } else {
        committed.join(" ") + " "
    };

    let mut suggestions = Vec::new();
    for (class, styling) in CLASS_STYLINGS {
        if taken.contains(styling) {
            continue;
        }

        if class.contains(&last) || styling.contains(&last) {
            suggestions.push(Suggestion::from_value(format!("{prefix}{class}")));
        }
    }

    suggestions
}
