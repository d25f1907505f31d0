#![deny(missing_docs)]
//! **bevy_layer_ratio** provides keyed colour ramps for the
//! [Bevy game engine](https://bevyengine.org/).
//!
//! A [`LayerRatio`] is an ordered list of colour [keys](Key) on a `0.0..=1.0`
//! ratio axis. Looking up a ratio returns the colour of the first key to its
//! right, which makes it a step ramp: handy for mapping heights, depths or
//! any normalized value to discrete colour bands.
//!
//! # Getting started
//!
//! Add [`LayerRatioPlugin`] to your Bevy app:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_layer_ratio::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((DefaultPlugins, LayerRatioPlugin::default()))
//!         .run();
//! }
//! ```
//!
//! ## Building in code
//!
//! ```
//! use bevy_layer_ratio::prelude::*;
//!
//! let mut layers = LayerRatio::empty();
//! layers.add_key([0.1, 0.3, 0.9, 1.0], 0.3);
//! layers.add_key([0.9, 0.8, 0.5, 1.0], 0.4);
//! layers.add_key([0.2, 0.6, 0.1, 1.0], 1.0);
//!
//! assert_eq!(layers.evaluate(0.1), [0.1, 0.3, 0.9, 1.0]);
//! assert_eq!(layers.evaluate(0.35), [0.9, 0.8, 0.5, 1.0]);
//! ```
//!
//! ## Loading from a file
//!
//! Layer ratios can be loaded from `.ratio.ron` files, see
//! [`LayerRatioAsset`](asset::LayerRatioAsset). Spawn a [`LayerRatioPreview`] to have the plugin bake
//! the asset into a texture:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_layer_ratio::prelude::*;
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(LayerRatioPreview::new(asset_server.load("terrain.ratio.ron")));
//! }
//! ```
//!
//! ## Editing
//!
//! [`LayerRatioEditState`] holds the selection of an editor and applies
//! insert, drag, recolour and delete actions to the layer ratio it owns.

/// Layer ratio data types and the RON asset format.
pub mod asset;
/// Editing session state.
pub mod edit;
/// Convenience re-exports for common layer ratio types.
pub mod prelude;
/// Texture baking and caching for layer ratios.
pub mod textures;

use bevy::prelude::*;

use asset::{LayerRatioAsset, LayerRatioAssetLoader};
use textures::{
    DEFAULT_TEXTURE_WIDTH, LayerRatioTextureCache, create_fallback_layer_ratio_texture,
    prepare_layer_ratio_textures,
};

/// Plugin that registers the layer ratio asset, its loader and texture baking.
#[derive(Debug, Clone)]
pub struct LayerRatioPlugin {
    /// Width of baked textures for previews that do not set their own.
    pub texture_width: u32,
}

impl Default for LayerRatioPlugin {
    fn default() -> Self {
        Self {
            texture_width: DEFAULT_TEXTURE_WIDTH,
        }
    }
}

impl Plugin for LayerRatioPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LayerRatioAsset>()
            .init_asset_loader::<LayerRatioAssetLoader>();

        app.insert_resource(LayerRatioSettings {
            texture_width: self.texture_width.max(1),
        })
        .init_resource::<LayerRatioTextureCache>()
        .add_systems(Startup, create_fallback_layer_ratio_texture)
        .add_systems(PostUpdate, prepare_layer_ratio_textures);
    }
}

/// Runtime settings, inserted by [`LayerRatioPlugin`].
#[derive(Resource, Debug, Clone)]
pub struct LayerRatioSettings {
    /// Width of baked textures for previews that do not set their own.
    pub texture_width: u32,
}

impl Default for LayerRatioSettings {
    fn default() -> Self {
        Self {
            texture_width: DEFAULT_TEXTURE_WIDTH,
        }
    }
}

pub use asset::{Key, LayerRatio, LayerRatioError};
pub use edit::LayerRatioEditState;
pub use textures::LayerRatioPreview;
