//! Asset bundle selection.

use crate::settings::{AssetDelivery, Settings};

/// Names of the asset bundles a page needs under the given settings.
///
/// Kit delivery is one self-contained bundle. For CDN and self-hosted
/// delivery the name encodes delivery, render method and style:
/// `{delivery}.{method}.all` when every style toggle is on, otherwise one
/// `{delivery}.{method}.{style}` per enabled style. An undetermined
/// delivery selects nothing.
pub fn asset_bundles(settings: &Settings) -> Vec<String> {
    match settings.asset.delivery {
        AssetDelivery::Kit => vec!["kit".to_string()],
        AssetDelivery::Cdn | AssetDelivery::SelfHosted => {
            let delivery = settings.asset.delivery.as_str();
            let method = settings.method.as_str();
            let styles = &settings.asset.use_styles;

            if styles.all_enabled() {
                vec![format!("{delivery}.{method}.all")]
            } else {
                styles
                    .enabled()
                    .iter()
                    .map(|style| format!("{delivery}.{method}.{style}"))
                    .collect()
            }
        }
        AssetDelivery::Unknown => Vec::new(),
    }
}
