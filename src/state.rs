use crate::config::{KeyColor, PianoConfig, ShowPressMode};
use crate::error::PkResult;
use crate::keys::KeyIndex;
use crate::press::PressedKeys;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Flat snapshot of everything a host needs to recreate the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub pressed_keys: Vec<KeyIndex>,
    pub show_press_mode: ShowPressMode,
    pub enable_multi_key_highlighting: bool,
    pub number_of_keys: usize,
    pub white_key_color: KeyColor,
    pub black_key_color: KeyColor,
    pub pressed_key_color: KeyColor,
    pub key_stroke_color: KeyColor,
    pub key_corner_radius: u32,
    pub key_stroke_width: u32,
    pub black_key_width_scale: f32,
    pub black_key_height_scale: f32,
}

impl SavedState {
    pub fn capture(config: &PianoConfig, pressed: &PressedKeys) -> Self {
        Self {
            pressed_keys: pressed.to_vec(),
            show_press_mode: config.show_press_mode,
            enable_multi_key_highlighting: config.enable_multi_key_highlighting,
            number_of_keys: config.number_of_keys,
            white_key_color: config.white_key_color,
            black_key_color: config.black_key_color,
            pressed_key_color: config.pressed_key_color,
            key_stroke_color: config.key_stroke_color,
            key_corner_radius: config.key_corner_radius,
            key_stroke_width: config.key_stroke_width,
            black_key_width_scale: config.black_key_width_scale,
            black_key_height_scale: config.black_key_height_scale,
        }
    }

    /// The configuration part of the snapshot. Not validated.
    pub fn config(&self) -> PianoConfig {
        PianoConfig {
            number_of_keys: self.number_of_keys,
            black_key_width_scale: self.black_key_width_scale,
            black_key_height_scale: self.black_key_height_scale,
            key_stroke_width: self.key_stroke_width,
            key_corner_radius: self.key_corner_radius,
            white_key_color: self.white_key_color,
            black_key_color: self.black_key_color,
            pressed_key_color: self.pressed_key_color,
            key_stroke_color: self.key_stroke_color,
            show_press_mode: self.show_press_mode,
            enable_multi_key_highlighting: self.enable_multi_key_highlighting,
        }
    }

    pub fn to_json(&self) -> PkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> PkResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> PkResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PkResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
