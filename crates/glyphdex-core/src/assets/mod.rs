//! Asset bundle selection, definition expansion and directory checks.

mod bundles;
mod definitions;
mod finder;

pub use bundles::asset_bundles;
pub use definitions::{dotted_string_leaves, expand_definitions};
pub use finder::verify_asset_dir;
