use bevy::{
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
};
use std::collections::{HashMap, HashSet};

use crate::LayerRatioSettings;
use crate::asset::{LayerRatio, LayerRatioAsset};

/// Default width, in pixels, of baked layer ratio textures.
pub const DEFAULT_TEXTURE_WIDTH: u32 = 256;

/// Baked layer ratio textures, shared between layer ratios with identical keys.
///
/// While the plugin runs, textures no [`LayerRatioPreview`] shows any more
/// are dropped at the end of each preparation pass.
#[derive(Resource, Default)]
pub struct LayerRatioTextureCache {
    cache: HashMap<(u64, u32), Handle<Image>>,
}

impl LayerRatioTextureCache {
    /// Returns the texture for `layer_ratio` at `width`, baking it on first use.
    pub fn get_or_create(
        &mut self,
        layer_ratio: &LayerRatio,
        width: u32,
        images: &mut Assets<Image>,
    ) -> Handle<Image> {
        let key = (layer_ratio.cache_key(), width);
        if let Some(handle) = self.cache.get(&key) {
            return handle.clone();
        }
        debug!(
            "baking layer ratio texture ({} keys, {width}px)",
            layer_ratio.len()
        );
        let image = bake_layer_ratio_texture(layer_ratio, width);
        let handle = images.add(image);
        self.cache.insert(key, handle.clone());
        handle
    }

    /// Returns the texture for `layer_ratio` at `width` if it was baked before.
    pub fn get(&self, layer_ratio: &LayerRatio, width: u32) -> Option<Handle<Image>> {
        self.cache.get(&(layer_ratio.cache_key(), width)).cloned()
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if the cache holds no textures.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every texture whose `(cache_key, width)` is not in `live`.
    ///
    /// The image itself is freed once its last strong handle is gone.
    pub fn retain_live(&mut self, live: &HashSet<(u64, u32)>) {
        self.cache.retain(|key, _| live.contains(key));
    }
}

/// Bakes a layer ratio into a `width` x 1 sRGB texture.
///
/// Each pixel is the step-evaluated colour at `x / (width - 1)`. A width of
/// zero is raised to one.
pub fn bake_layer_ratio_texture(layer_ratio: &LayerRatio, width: u32) -> Image {
    let width = width.max(1);
    let mut layer_ratio = layer_ratio.clone();
    let mut data = Vec::with_capacity(width as usize * 4);

    for color in layer_ratio.sample_strip(width as usize) {
        data.push((color[0] * 255.0).clamp(0.0, 255.0) as u8);
        data.push((color[1] * 255.0).clamp(0.0, 255.0) as u8);
        data.push((color[2] * 255.0).clamp(0.0, 255.0) as u8);
        data.push((color[3] * 255.0).clamp(0.0, 255.0) as u8);
    }

    create_1d_texture(width, data)
}

/// A 1x1 white texture to display while a layer ratio asset is still loading.
#[derive(Resource, Clone)]
pub struct FallbackLayerRatioTexture {
    /// Handle to the fallback image.
    pub handle: Handle<Image>,
}

fn create_1d_texture(width: u32, data: Vec<u8>) -> Image {
    let mut image = Image::new(
        Extent3d {
            width,
            height: 1,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::COPY_SRC;
    image
}

pub(crate) fn create_fallback_layer_ratio_texture(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
) {
    let handle = images.add(create_1d_texture(1, vec![255, 255, 255, 255]));
    commands.insert_resource(FallbackLayerRatioTexture { handle });
}

/// Previews a [`LayerRatioAsset`] as a texture.
///
/// While the asset loads, [`image`](Self::image) holds the
/// [fallback texture](FallbackLayerRatioTexture). Once it is loaded, it holds
/// the baked texture and follows any later change to the asset's keys.
#[derive(Component, Debug, Clone, Default)]
pub struct LayerRatioPreview {
    /// The layer ratio to preview.
    pub handle: Handle<LayerRatioAsset>,
    /// Texture width in pixels. `None` uses [`LayerRatioSettings::texture_width`].
    pub width: Option<u32>,
    /// The texture to display, `None` until the first preparation pass.
    pub image: Option<Handle<Image>>,
}

impl LayerRatioPreview {
    /// Creates a preview for `handle` at the default width.
    pub fn new(handle: Handle<LayerRatioAsset>) -> Self {
        Self {
            handle,
            ..default()
        }
    }

    /// Sets a texture width for this preview only.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

pub(crate) fn prepare_layer_ratio_textures(
    mut cache: ResMut<LayerRatioTextureCache>,
    mut images: ResMut<Assets<Image>>,
    settings: Res<LayerRatioSettings>,
    fallback: Option<Res<FallbackLayerRatioTexture>>,
    assets: Res<Assets<LayerRatioAsset>>,
    mut previews: Query<&mut LayerRatioPreview>,
) {
    let mut live = HashSet::new();

    for mut preview in &mut previews {
        let Some(asset) = assets.get(&preview.handle) else {
            if let Some(fallback) = &fallback {
                if preview.image.as_ref() != Some(&fallback.handle) {
                    preview.image = Some(fallback.handle.clone());
                }
            }
            continue;
        };
        let width = preview.width.unwrap_or(settings.texture_width);
        live.insert((asset.layer_ratio.cache_key(), width));
        let handle = cache.get_or_create(&asset.layer_ratio, width, &mut images);
        if preview.image.as_ref() != Some(&handle) {
            preview.image = Some(handle);
        }
    }

    cache.retain_live(&live);
}
