//! Settings model and YAML persistence.
//!
//! Mirrors the `glyphdex.settings` document:
//! - `method`: how icons are rendered (svg or webfonts)
//! - `asset.*`: where the icon assets come from (self, cdn, kit)
//! - `metadata.*`: where the icon manifest comes from (auto, self, cdn)

use crate::{GlyphdexError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process;
use tracing::debug;
use url::Url;

/// How icon markup is rendered on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMethod {
    #[default]
    Svg,
    Webfonts,
}

impl RenderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMethod::Svg => "svg",
            RenderMethod::Webfonts => "webfonts",
        }
    }
}

impl std::fmt::Display for RenderMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the icon assets (JS/CSS/webfonts) are served from.
///
/// Unrecognized strings deserialize to `Unknown` instead of failing, so a
/// hand-edited settings file degrades rather than aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AssetDelivery {
    #[default]
    #[serde(rename = "self")]
    SelfHosted,
    Cdn,
    Kit,
    Unknown,
}

impl From<String> for AssetDelivery {
    fn from(s: String) -> Self {
        match s.as_str() {
            "self" => AssetDelivery::SelfHosted,
            "cdn" => AssetDelivery::Cdn,
            "kit" => AssetDelivery::Kit,
            _ => AssetDelivery::Unknown,
        }
    }
}

impl AssetDelivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetDelivery::SelfHosted => "self",
            AssetDelivery::Cdn => "cdn",
            AssetDelivery::Kit => "kit",
            AssetDelivery::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AssetDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the icon manifest is read from.
///
/// `Auto` defers to [`AssetDelivery`], resolving the manifest next to
/// whatever serves the assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MetadataDelivery {
    #[default]
    Auto,
    #[serde(rename = "self")]
    SelfHosted,
    Cdn,
    Unknown,
}

impl From<String> for MetadataDelivery {
    fn from(s: String) -> Self {
        match s.as_str() {
            "auto" => MetadataDelivery::Auto,
            "self" => MetadataDelivery::SelfHosted,
            "cdn" => MetadataDelivery::Cdn,
            _ => MetadataDelivery::Unknown,
        }
    }
}

impl MetadataDelivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataDelivery::Auto => "auto",
            MetadataDelivery::SelfHosted => "self",
            MetadataDelivery::Cdn => "cdn",
            MetadataDelivery::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MetadataDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A CDN endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CdnEndpoint {
    #[serde(default)]
    pub uri: String,
}

/// A self-hosted location, relative to the application root unless it
/// starts with `/`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SelfHostedEndpoint {
    #[serde(default)]
    pub path: String,
}

/// A Font Awesome kit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KitEndpoint {
    #[serde(default)]
    pub uri: String,
}

/// Which icon style families get their bundles attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleToggles {
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub regular: bool,
    #[serde(default)]
    pub light: bool,
    #[serde(default)]
    pub brands: bool,
}

impl Default for StyleToggles {
    fn default() -> Self {
        // Light is Pro-only; the Free distribution ships the other three.
        Self {
            solid: true,
            regular: true,
            light: false,
            brands: true,
        }
    }
}

impl StyleToggles {
    /// Enabled style names in attachment order.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut styles = Vec::new();
        if self.solid {
            styles.push("solid");
        }
        if self.regular {
            styles.push("regular");
        }
        if self.light {
            styles.push("light");
        }
        if self.brands {
            styles.push("brands");
        }
        styles
    }

    /// True when every style family is enabled, in which case the combined
    /// bundle is cheaper than four separate ones.
    pub fn all_enabled(&self) -> bool {
        self.solid && self.regular && self.light && self.brands
    }
}

/// Asset delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetSettings {
    #[serde(default)]
    pub delivery: AssetDelivery,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub cdn: CdnEndpoint,
    #[serde(default, rename = "self")]
    pub self_hosted: SelfHostedEndpoint,
    #[serde(default)]
    pub kit: KitEndpoint,
    #[serde(default, rename = "use")]
    pub use_styles: StyleToggles,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            delivery: AssetDelivery::SelfHosted,
            version: default_version(),
            cdn: CdnEndpoint {
                uri: format!("https://use.fontawesome.com/releases/v{}", default_version()),
            },
            self_hosted: SelfHostedEndpoint {
                path: "libraries/fortawesome--fontawesome-free".to_string(),
            },
            kit: KitEndpoint::default(),
            use_styles: StyleToggles::default(),
        }
    }
}

/// Manifest delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataSettings {
    #[serde(default)]
    pub delivery: MetadataDelivery,
    #[serde(default)]
    pub cdn: CdnEndpoint,
    #[serde(default, rename = "self")]
    pub self_hosted: SelfHostedEndpoint,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            delivery: MetadataDelivery::Auto,
            cdn: CdnEndpoint {
                uri: format!(
                    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@{}/metadata",
                    default_version()
                ),
            },
            self_hosted: SelfHostedEndpoint {
                path: "libraries/fortawesome--fontawesome-free/metadata".to_string(),
            },
        }
    }
}

fn default_version() -> String {
    "6.1.1".to_string()
}

/// Root settings document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub method: RenderMethod,
    #[serde(default)]
    pub asset: AssetSettings,
    #[serde(default)]
    pub metadata: MetadataSettings,
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| GlyphdexError::io_with_path(e, path))?;
        let settings: Settings =
            serde_yaml_ng::from_str(&contents).map_err(|e| GlyphdexError::Yaml {
                message: format!("Failed to parse {}: {}", path.display(), e),
                source: Some(e),
            })?;
        Ok(settings)
    }

    /// Write settings to a YAML file atomically.
    ///
    /// Serializes to a temp file in the same directory, then renames over
    /// the target so readers never see a partial document.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| GlyphdexError::io_with_path(e, parent))?;
            }
        }

        let serialized = serde_yaml_ng::to_string(self).map_err(|e| GlyphdexError::Yaml {
            message: format!("Failed to serialize settings: {}", e),
            source: Some(e),
        })?;

        let temp_path = path.with_extension(format!("yml.{}.tmp", process::id()));
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| GlyphdexError::io_with_path(e, &temp_path))?;
            file.write_all(serialized.as_bytes())
                .map_err(|e| GlyphdexError::io_with_path(e, &temp_path))?;
            file.sync_all()
                .map_err(|e| GlyphdexError::io_with_path(e, &temp_path))?;
        }

        fs::rename(&temp_path, path).map_err(|e| GlyphdexError::io_with_path(e, path))?;
        sync_parent_dir(path);

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate delivery settings the way the settings form does.
    ///
    /// CDN delivery requires an absolute CDN URI, kit delivery an absolute
    /// kit URI. Self-hosted delivery needs nothing up front; a bad path
    /// just means the manifest is never found.
    pub fn validate(&self) -> Result<()> {
        match self.asset.delivery {
            AssetDelivery::Cdn => require_absolute_url("asset.cdn.uri", &self.asset.cdn.uri),
            AssetDelivery::Kit => require_absolute_url("asset.kit.uri", &self.asset.kit.uri),
            _ => Ok(()),
        }
    }
}

fn require_absolute_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GlyphdexError::invalid_settings(field, "must not be empty"));
    }
    match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(GlyphdexError::invalid_settings(
            field,
            format!("{value:?} is not an absolute URL"),
        )),
    }
}

fn sync_parent_dir(path: &Path) {
    // Rename durability needs the directory flushed too. Failure here is
    // not worth surfacing.
    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}
