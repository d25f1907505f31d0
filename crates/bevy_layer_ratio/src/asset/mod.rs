mod layer_ratio;
pub(crate) mod serde_helpers;
/// Asset format version tracking and compatibility validation.
pub mod versioning;

pub use layer_ratio::{BLACK, Key, LayerRatio, LayerRatioError, WHITE, normalize_ratio};

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use versioning::{FORMAT_VERSIONS, FormatVersion, VersionStatus, current_version_in};

/// Asset loader for [`LayerRatioAsset`] files in RON format.
///
/// Files are validated against [`FORMAT_VERSIONS`] unless another history is
/// given with [`with_versions`](Self::with_versions).
#[derive(TypePath)]
pub struct LayerRatioAssetLoader {
    versions: &'static [FormatVersion],
}

impl Default for LayerRatioAssetLoader {
    fn default() -> Self {
        Self::with_versions(FORMAT_VERSIONS)
    }
}

impl LayerRatioAssetLoader {
    /// Creates a loader that validates files against `versions`, whose last
    /// entry is the current version.
    pub fn with_versions(versions: &'static [FormatVersion]) -> Self {
        Self { versions }
    }
}

/// Errors that can occur when loading a [`LayerRatioAsset`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LayerRatioAssetLoaderError {
    /// An I/O error occurred while reading the asset file.
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    /// The asset file contained invalid RON syntax.
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// The asset file has an unknown format version, likely from a newer release.
    #[error("Unknown layer_ratio_version. You may need a newer version of bevy_layer_ratio.")]
    UnknownVersion,
    /// The asset file has a version that requires breaking changes to upgrade.
    #[error(
        "Asset version \"{found}\" is incompatible with current version \"{current}\". Manual migration is required."
    )]
    IncompatibleVersion {
        /// The version found in the asset file.
        found: String,
        /// The current format version.
        current: String,
    },
}

impl AssetLoader for LayerRatioAssetLoader {
    type Asset = LayerRatioAsset;
    type Settings = ();
    type Error = LayerRatioAssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let mut asset = ron::de::from_bytes::<LayerRatioAsset>(&bytes)?;

        match asset.try_upgrade_version_in(self.versions) {
            VersionStatus::Current => {}
            VersionStatus::Outdated { found, current } => {
                let path = load_context.path();
                warn!(
                    "{path:?}: loaded asset with layer_ratio_version \"{found}\", current is \"{current}\""
                );
            }
            VersionStatus::Incompatible { found, current } => {
                return Err(LayerRatioAssetLoaderError::IncompatibleVersion {
                    found,
                    current: current.to_string(),
                });
            }
            VersionStatus::Unknown => {
                return Err(LayerRatioAssetLoaderError::UnknownVersion);
            }
        }

        debug!(
            "loaded layer ratio {:?} with {} keys",
            asset.name,
            asset.layer_ratio.len()
        );
        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["ratio.ron"]
    }
}

/// A named [`LayerRatio`] stored as a RON asset.
///
/// The key list is normalized when the file is read: ratios are clamped to
/// `0.0..=1.0`, rounded to two decimals and sorted. A file with no keys loads
/// as the default layer ratio.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRatioAsset {
    layer_ratio_version: String,
    /// Display name for this layer ratio.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The keys and editor flags.
    #[serde(default)]
    pub layer_ratio: LayerRatio,
}

impl Default for LayerRatioAsset {
    fn default() -> Self {
        Self::new(String::new(), LayerRatio::default())
    }
}

impl LayerRatioAsset {
    /// Creates a new asset with the current format version.
    pub fn new(name: String, layer_ratio: LayerRatio) -> Self {
        Self {
            layer_ratio_version: current_version_in(FORMAT_VERSIONS).to_string(),
            name,
            layer_ratio,
        }
    }

    /// Returns the format version this asset was written with.
    pub fn layer_ratio_version(&self) -> &str {
        &self.layer_ratio_version
    }

    /// Validates the asset version and upgrades it in place when an upgrade
    /// needs no migration.
    pub fn try_upgrade_version(&mut self) -> VersionStatus {
        self.try_upgrade_version_in(FORMAT_VERSIONS)
    }

    /// [`try_upgrade_version`](Self::try_upgrade_version) against an explicit
    /// version history.
    pub fn try_upgrade_version_in(&mut self, versions: &[FormatVersion]) -> VersionStatus {
        let status = versioning::validate_version_in(versions, &self.layer_ratio_version);
        if matches!(status, VersionStatus::Outdated { .. }) {
            self.layer_ratio_version = current_version_in(versions).to_string();
        }
        status
    }

    /// Serializes the asset to pretty-printed RON, ready to be written to a
    /// `.ratio.ron` file.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
