use bevy::{
    color::{ColorToComponents, LinearRgba},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::serde_helpers::is_false;

/// Opaque white, `[1.0, 1.0, 1.0, 1.0]`.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Opaque black, `[0.0, 0.0, 0.0, 1.0]`.
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Errors returned by [`LayerRatio`] operations that address a key by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayerRatioError {
    /// The index does not name a stored key.
    #[error("key index {index} is out of range for a layer ratio with {len} keys")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The number of keys at the time of the request.
        len: usize,
    },
}

/// A single colour key placed on the ratio axis.
///
/// Keys are immutable. Changing a key's colour or ratio replaces it with a new
/// key through [`LayerRatio::update_key_color`] or
/// [`LayerRatio::update_key_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Key {
    color: [f32; 4],
    ratio: f32,
}

impl Key {
    /// Creates a key as-is. The ratio is only normalized once the key goes
    /// through a [`LayerRatio`].
    pub fn new(color: [f32; 4], ratio: f32) -> Self {
        Self { color, ratio }
    }

    /// The key colour as linear RGBA components in `0.0..=1.0`.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// The key position on the ratio axis.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// The key colour as a Bevy [`LinearRgba`].
    pub fn linear_rgba(&self) -> LinearRgba {
        LinearRgba::from_f32_array(self.color)
    }
}

/// Clamps a ratio to `0.0..=1.0` and rounds it to two decimals.
///
/// Midpoints round to even. `NaN` maps to `0.0`.
pub fn normalize_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        return 0.0;
    }
    let clamped = f64::from(ratio.clamp(0.0, 1.0));
    ((clamped * 100.0).round_ties_even() / 100.0) as f32
}

/// An ordered set of colour keys along a `0.0..=1.0` ratio axis.
///
/// Keys are kept sorted by ratio. Lookup is a step function: a ratio maps to
/// the colour of the first key strictly to its right, see
/// [`evaluate`](Self::evaluate). There is no blending between keys.
///
/// The default value holds two keys, white at `0.5` and black at `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(from = "LayerRatioData")]
pub struct LayerRatio {
    keys: Vec<Key>,
    /// If `true`, editors pick a random colour for newly inserted keys instead
    /// of the colour already shown at that ratio. Does not affect evaluation.
    #[serde(default, skip_serializing_if = "is_false")]
    pub randomize_color: bool,
}

// unvalidated shape of a serialized layer ratio, normalized on conversion
#[derive(Deserialize)]
struct LayerRatioData {
    #[serde(default)]
    keys: Vec<Key>,
    #[serde(default)]
    randomize_color: bool,
}

impl From<LayerRatioData> for LayerRatio {
    fn from(data: LayerRatioData) -> Self {
        let mut layer_ratio = Self::from_keys(data.keys);
        layer_ratio.randomize_color = data.randomize_color;
        layer_ratio
    }
}

impl Default for LayerRatio {
    fn default() -> Self {
        let mut layer_ratio = Self::empty();
        layer_ratio.reset();
        layer_ratio
    }
}

impl LayerRatio {
    /// Creates a layer ratio holding the two default keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer ratio with no keys.
    ///
    /// The first call to [`evaluate`](Self::evaluate) resets it to the default
    /// keys.
    pub fn empty() -> Self {
        Self {
            keys: Vec::new(),
            randomize_color: false,
        }
    }

    /// Builds a layer ratio from keys in any order.
    ///
    /// Every key is inserted through [`add_key`](Self::add_key), so ratios are
    /// normalized and sorted. Keys with equal ratios keep their relative
    /// order. An empty input yields the default keys.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut layer_ratio = Self::empty();
        for key in keys {
            layer_ratio.add_key(key.color, key.ratio);
        }
        if layer_ratio.keys.is_empty() {
            layer_ratio.reset();
        }
        layer_ratio
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The stored keys in ascending ratio order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Consumes the layer ratio and returns its keys in ascending ratio order.
    pub fn into_keys(self) -> Vec<Key> {
        self.keys
    }

    /// Returns the key at `index`.
    pub fn key(&self, index: usize) -> Result<Key, LayerRatioError> {
        self.keys
            .get(index)
            .copied()
            .ok_or(LayerRatioError::IndexOutOfRange {
                index,
                len: self.keys.len(),
            })
    }

    /// Returns the colour for `ratio`, resetting to the default keys first if
    /// the layer ratio is empty.
    ///
    /// The result is the colour of the first key whose ratio is strictly
    /// greater than `ratio`, or of the last key when there is none. A key
    /// sitting exactly on `ratio` is skipped, so colours change in a step just
    /// after each key.
    pub fn evaluate(&mut self, ratio: f32) -> [f32; 4] {
        if self.keys.is_empty() {
            self.reset();
        }
        self.sample(ratio)
    }

    /// Read-only [`evaluate`](Self::evaluate). An empty layer ratio answers
    /// as the default keys would, without being modified.
    pub fn sample(&self, ratio: f32) -> [f32; 4] {
        let Some(last) = self.keys.last() else {
            return Self::default().sample(ratio);
        };
        self.keys
            .iter()
            .find(|key| key.ratio > ratio)
            .unwrap_or(last)
            .color
    }

    /// Inserts a key and returns its index.
    ///
    /// The ratio is normalized with [`normalize_ratio`]. The key goes before
    /// the first key with a strictly greater ratio, so it lands after any keys
    /// with an equal ratio.
    pub fn add_key(&mut self, color: [f32; 4], ratio: f32) -> usize {
        let key = Key::new(color, normalize_ratio(ratio));
        let index = self
            .keys
            .iter()
            .position(|existing| key.ratio < existing.ratio)
            .unwrap_or(self.keys.len());
        self.keys.insert(index, key);
        index
    }

    /// Removes the key at `index`, unless it is the only key left.
    pub fn remove_key(&mut self, index: usize) -> Result<(), LayerRatioError> {
        self.check_index(index)?;
        if self.keys.len() >= 2 {
            self.keys.remove(index);
        }
        Ok(())
    }

    /// Moves the key at `index` to `ratio` and returns its new index.
    ///
    /// The key count never changes, even when `index` names the only key.
    pub fn update_key_ratio(&mut self, index: usize, ratio: f32) -> Result<usize, LayerRatioError> {
        self.check_index(index)?;
        let key = self.keys.remove(index);
        Ok(self.add_key(key.color, ratio))
    }

    /// Replaces the colour of the key at `index`, keeping its ratio.
    pub fn update_key_color(&mut self, index: usize, color: [f32; 4]) -> Result<(), LayerRatioError> {
        self.check_index(index)?;
        let ratio = self.keys[index].ratio;
        self.keys[index] = Key::new(color, ratio);
        Ok(())
    }

    /// Clears all keys and inserts the defaults: white at `0.5`, black at `1.0`.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.add_key(WHITE, 0.5);
        self.add_key(BLACK, 1.0);
    }

    /// Samples `width` evenly spaced ratios from `0.0` to `1.0` inclusive,
    /// pixel `i` at `i / (width - 1)`.
    ///
    /// A width of one divides zero by zero, so its only pixel is sampled at
    /// `NaN` and takes the last key's colour.
    pub fn sample_strip(&mut self, width: usize) -> Vec<[f32; 4]> {
        if self.keys.is_empty() {
            self.reset();
        }
        let last = width.saturating_sub(1) as f32;
        (0..width).map(|i| self.sample(i as f32 / last)).collect()
    }

    /// Hash of the key colours and ratios, used to share baked textures.
    pub fn cache_key(&self) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.keys.len().hash(&mut hasher);
        for key in &self.keys {
            for c in key.color {
                c.to_bits().hash(&mut hasher);
            }
            key.ratio.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    fn check_index(&self, index: usize) -> Result<(), LayerRatioError> {
        if index < self.keys.len() {
            Ok(())
        } else {
            Err(LayerRatioError::IndexOutOfRange {
                index,
                len: self.keys.len(),
            })
        }
    }
}
