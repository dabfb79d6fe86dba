use crate::error::{PianoError, PkResult};
use crate::keys::{MAX_NUMBER_OF_KEYS, MIN_NUMBER_OF_KEYS};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

pub const SCALE_MIN: f32 = 0.05;
pub const SCALE_MAX: f32 = 1.0;

/// When keys are highlighted automatically from touch input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShowPressMode {
    /// Highlight while a pointer is on the key.
    #[default]
    OnKeyDown,
    /// Toggle the highlight on every completed click.
    OnKeyClick,
    /// Never highlight automatically; listeners may do it by hand.
    Off,
}

/// ARGB color, written as `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyColor(pub u32);

impl KeyColor {
    pub const WHITE: KeyColor = KeyColor(0xFFFF_FFFF);
    pub const BLACK: KeyColor = KeyColor(0xFF00_0000);

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl fmt::Display for KeyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for KeyColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid color '{}': expected #RRGGBB or #AARRGGBB", s);
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(KeyColor(0xFF00_0000 | value)),
            8 => Ok(KeyColor(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for KeyColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyColor> for String {
    fn from(color: KeyColor) -> Self {
        color.to_string()
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoConfig {
    // === GEOMETRY ===
    #[arg(long, default_value_t = 24)]
    pub number_of_keys: usize,
    #[arg(long, default_value_t = 0.6)]
    pub black_key_width_scale: f32,
    #[arg(long, default_value_t = 0.6)]
    pub black_key_height_scale: f32,
    #[arg(long, default_value_t = 2)]
    pub key_stroke_width: u32,
    #[arg(long, default_value_t = 0)]
    pub key_corner_radius: u32,

    // === COLORS ===
    #[arg(long, default_value_t = KeyColor::WHITE)]
    pub white_key_color: KeyColor,
    #[arg(long, default_value_t = KeyColor::BLACK)]
    pub black_key_color: KeyColor,
    #[arg(long, default_value_t = KeyColor(0xFF9E_9E9E))]
    pub pressed_key_color: KeyColor,
    #[arg(long, default_value_t = KeyColor::BLACK)]
    pub key_stroke_color: KeyColor,

    // === TOUCH ===
    #[arg(long, default_value_t = ShowPressMode::OnKeyDown)]
    pub show_press_mode: ShowPressMode,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub enable_multi_key_highlighting: bool,
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self {
            number_of_keys: 24,
            black_key_width_scale: 0.6,
            black_key_height_scale: 0.6,
            key_stroke_width: 2,
            key_corner_radius: 0,
            white_key_color: KeyColor::WHITE,
            black_key_color: KeyColor::BLACK,
            pressed_key_color: KeyColor(0xFF9E_9E9E),
            key_stroke_color: KeyColor::BLACK,
            show_press_mode: ShowPressMode::OnKeyDown,
            enable_multi_key_highlighting: true,
        }
    }
}

impl PianoConfig {
    pub fn validate(&self) -> PkResult<()> {
        validate_number_of_keys(self.number_of_keys)?;
        validate_scale("blackKeyWidthScale", self.black_key_width_scale)?;
        validate_scale("blackKeyHeightScale", self.black_key_height_scale)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PkResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: PianoConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrites fields with values the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &PianoConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(number_of_keys);
        update_if_present!(black_key_width_scale);
        update_if_present!(black_key_height_scale);
        update_if_present!(key_stroke_width);
        update_if_present!(key_corner_radius);

        update_if_present!(white_key_color);
        update_if_present!(black_key_color);
        update_if_present!(pressed_key_color);
        update_if_present!(key_stroke_color);

        update_if_present!(show_press_mode);
        update_if_present!(enable_multi_key_highlighting);
    }
}

pub fn validate_number_of_keys(number_of_keys: usize) -> PkResult<()> {
    if !(MIN_NUMBER_OF_KEYS..=MAX_NUMBER_OF_KEYS).contains(&number_of_keys) {
        return Err(PianoError::InvalidConfiguration(format!(
            "numberOfKeys must be between {} and {} (both inclusive). Actual numberOfKeys: {}",
            MIN_NUMBER_OF_KEYS, MAX_NUMBER_OF_KEYS, number_of_keys
        )));
    }
    Ok(())
}

pub fn validate_scale(name: &str, scale: f32) -> PkResult<()> {
    // NaN fails the range check too.
    if !(SCALE_MIN..=SCALE_MAX).contains(&scale) {
        return Err(PianoError::InvalidConfiguration(format!(
            "{} must be between {} and {} (both inclusive). Actual {}: {}",
            name, SCALE_MIN, SCALE_MAX, name, scale
        )));
    }
    Ok(())
}
