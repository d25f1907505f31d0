use bevy::prelude::*;
use rand::Rng;

use crate::asset::{Key, LayerRatio, LayerRatioError};

// ratio steps per pixel when scrubbing a ratio field
const NUDGE_SPEED: f32 = 3.0;

/// Editing session for a [`LayerRatio`].
///
/// Tracks which key is selected while an editor inserts, drags, recolours and
/// deletes keys. Drawing and hit-testing are left to the UI; it reports what
/// happened in ratio space and reads the result back from here.
#[derive(Component, Debug, Clone, Default)]
pub struct LayerRatioEditState {
    /// The layer ratio being edited.
    pub layer_ratio: LayerRatio,
    selected: usize,
}

impl LayerRatioEditState {
    /// Starts editing `layer_ratio` with its first key selected.
    ///
    /// An empty layer ratio is reset to the default keys so the selection is
    /// always valid.
    pub fn from_layer_ratio(mut layer_ratio: LayerRatio) -> Self {
        if layer_ratio.is_empty() {
            layer_ratio.reset();
        }
        Self {
            layer_ratio,
            selected: 0,
        }
    }

    /// Index of the selected key.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected key.
    pub fn selected_key(&self) -> Result<Key, LayerRatioError> {
        self.layer_ratio.key(self.selected)
    }

    /// Selects the key at `index`.
    pub fn select(&mut self, index: usize) -> Result<(), LayerRatioError> {
        self.layer_ratio.key(index)?;
        self.selected = index;
        Ok(())
    }

    /// Inserts a key at `ratio` and selects it.
    ///
    /// With [`LayerRatio::randomize_color`] set, the key gets a random opaque
    /// colour from `rng`. Otherwise it takes the colour already shown at
    /// `ratio`, so the preview does not change until the key is edited.
    pub fn insert_key(&mut self, ratio: f32, rng: &mut impl Rng) -> usize {
        let color = if self.layer_ratio.randomize_color {
            [rng.random(), rng.random(), rng.random(), 1.0]
        } else {
            self.layer_ratio.evaluate(ratio)
        };
        self.selected = self.layer_ratio.add_key(color, ratio);
        self.selected
    }

    /// Moves the selected key to `ratio`. The selection follows the key.
    pub fn move_selected(&mut self, ratio: f32) -> Result<usize, LayerRatioError> {
        self.selected = self.layer_ratio.update_key_ratio(self.selected, ratio)?;
        Ok(self.selected)
    }

    /// Scrubs the selected key's ratio by a horizontal drag of `delta` pixels.
    ///
    /// Each pixel moves the ratio by three hundredths, truncated towards zero.
    pub fn nudge_selected(&mut self, delta: f32) -> Result<usize, LayerRatioError> {
        let ratio = self.selected_key()?.ratio();
        let scaled = ratio * 100.0 + delta * NUDGE_SPEED;
        self.move_selected(scaled.trunc() / 100.0)
    }

    /// Replaces the colour of the selected key.
    pub fn recolor_selected(&mut self, color: [f32; 4]) -> Result<(), LayerRatioError> {
        self.layer_ratio.update_key_color(self.selected, color)
    }

    /// Deletes the selected key unless it is the last one.
    ///
    /// If the selection pointed at the last key, it moves to the new last key.
    pub fn delete_selected(&mut self) -> Result<(), LayerRatioError> {
        self.layer_ratio.remove_key(self.selected)?;
        if self.selected >= self.layer_ratio.len() {
            self.selected = self.layer_ratio.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Resets the layer ratio to its default keys and selects the first one.
    pub fn reset(&mut self) {
        self.layer_ratio.reset();
        self.selected = 0;
    }

    /// Ends the session and returns the edited layer ratio.
    pub fn into_layer_ratio(self) -> LayerRatio {
        self.layer_ratio
    }
}
