//! Sanity checks for self-hosted asset directories.

use std::path::Path;

/// Entries the bundle definitions reference in a self-hosted release
/// directory. A trailing `/` marks a required directory.
const REQUIRED_ENTRIES: &[&str] = &[
    "js/all.js",
    "js/all.min.js",
    "js/fontawesome.js",
    "css/all.css",
    "css/all.min.css",
    "css/fontawesome.css",
    "css/fontawesome.min.css",
    "metadata/icons.yml",
    "webfonts/",
];

/// Check that a directory holds a usable self-hosted release, returning
/// the required entries it is missing. Empty means usable.
pub fn verify_asset_dir(path: &Path) -> Vec<String> {
    let mut missing = Vec::new();
    for entry in REQUIRED_ENTRIES {
        let (relative, want_dir) = match entry.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (*entry, false),
        };

        let target = path.join(relative);
        let present = if want_dir {
            target.is_dir()
        } else {
            target.is_file()
        };

        if !present {
            missing.push((*entry).to_string());
        }
    }

    missing
}
