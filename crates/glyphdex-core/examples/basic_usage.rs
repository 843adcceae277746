//! Basic usage example - suggest icons for a typed prefix

use std::path::Path;

use glyphdex_core::{Glyphdex, Result};

fn main() -> Result<()> {
    // Settings file and query from args, with defaults
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "glyphdex.yml".to_string());
    let query = std::env::args().nth(2).unwrap_or_else(|| "hou".to_string());

    println!("Loading settings from: {}", settings_path);
    let dex = Glyphdex::open(Path::new(&settings_path), ".", None)?;

    match dex.locate("icons.yml") {
        Some(location) => println!("Manifest location: {}", location),
        None => println!("Manifest location cannot be determined under these settings."),
    }

    let suggestions = dex.icon_suggestions(&query);
    if suggestions.is_empty() {
        println!("No icons match '{}'.", query);
    } else {
        println!("Found {} icons for '{}':", suggestions.len(), query);
        for suggestion in suggestions {
            println!("  - {}", suggestion.value);
        }
    }

    Ok(())
}
