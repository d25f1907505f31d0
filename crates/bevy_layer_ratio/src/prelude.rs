pub use crate::{LayerRatioPlugin, LayerRatioSettings};

pub use crate::asset::{
    BLACK, Key, LayerRatio, LayerRatioAsset, LayerRatioAssetLoader, LayerRatioAssetLoaderError,
    LayerRatioError, WHITE,
};
pub use crate::edit::LayerRatioEditState;
pub use crate::textures::{FallbackLayerRatioTexture, LayerRatioPreview, LayerRatioTextureCache};
