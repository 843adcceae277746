//! Manifest location resolution.

use crate::settings::{AssetDelivery, MetadataDelivery, Settings};
use tracing::debug;

/// Resolves where a metadata file lives under the configured delivery
/// scheme.
///
/// Pure string computation: no I/O, no caching. The result is either a
/// URL (CDN delivery) or a filesystem path (self-hosted delivery).
/// Kit delivery carries no location information, so resolution yields
/// `None` and callers fall back to empty metadata.
pub struct MetadataLocator {
    settings: Settings,
    app_root: String,
}

impl MetadataLocator {
    pub fn new(settings: Settings, app_root: impl Into<String>) -> Self {
        Self {
            settings,
            app_root: app_root.into(),
        }
    }

    /// Resolve the location of `file` relative to the metadata base.
    ///
    /// An empty `file` resolves to the base location itself.
    pub fn locate(&self, file: &str) -> Option<String> {
        let location = match self.settings.metadata.delivery {
            MetadataDelivery::Cdn => {
                join_location(&[&self.settings.metadata.cdn.uri, file])
            }
            MetadataDelivery::SelfHosted => {
                let base = self.rooted(&self.settings.metadata.self_hosted.path);
                join_location(&[&base, file])
            }
            MetadataDelivery::Auto => return self.locate_beside_assets(file),
            MetadataDelivery::Unknown => return None,
        };
        Some(location)
    }

    /// Auto delivery: the manifest sits in a `metadata/` directory next to
    /// whatever serves the assets.
    fn locate_beside_assets(&self, file: &str) -> Option<String> {
        match self.settings.asset.delivery {
            AssetDelivery::Cdn => Some(join_location(&[
                &self.settings.asset.cdn.uri,
                "metadata",
                file,
            ])),
            AssetDelivery::SelfHosted => {
                let base = self.rooted(&self.settings.asset.self_hosted.path);
                Some(join_location(&[&base, "metadata", file]))
            }
            AssetDelivery::Kit => {
                debug!("Kit delivery has no metadata location");
                None
            }
            AssetDelivery::Unknown => None,
        }
    }

    /// Treat a path without a leading `/` as relative to the application
    /// root.
    fn rooted(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            join_location(&[&self.app_root, path])
        }
    }
}

/// Join path/URL segments with exactly one `/` between them.
///
/// Empty segments are skipped; the first non-empty segment keeps its
/// leading characters untouched so absolute paths and URL schemes
/// survive.
fn join_location(parts: &[&str]) -> String {
    let mut result = String::new();
    for part in parts {
        if result.is_empty() {
            result = (*part).to_string();
        } else if !part.is_empty() {
            result = format!(
                "{}/{}",
                result.trim_end_matches('/'),
                part.trim_start_matches('/')
            );
        }
    }
    result
}
