use crate::config::PianoConfig;
use crate::keys::{self, black_key_index, white_key_index, KeyCounts, KeyIndex};
use crate::press::PressedKeys;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod hit;

/// Pixel bounds of one key. All four edges are inclusive for hit testing.
///
/// `right` and `bottom` may equal the widget's width and height, so the
/// point `(width, height)` itself lands on the rightmost key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl KeyRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn center(&self) -> (i32, i32) {
        let mid = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
        (mid(self.left, self.right), mid(self.top, self.bottom))
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Scalars shared by every key of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyDimensions {
    pub white_key_width: i32,
    pub white_key_height: i32,
    pub black_key_width: i32,
    pub black_key_height: i32,
    /// Pixels lost to integer division, handed out one each to the leftmost white keys.
    pub width_remainder: i32,
}

/// The configuration inputs the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub number_of_keys: usize,
    pub black_key_width_scale: f32,
    pub black_key_height_scale: f32,
    pub stroke_width: u32,
}

impl From<&PianoConfig> for LayoutParams {
    fn from(config: &PianoConfig) -> Self {
        Self {
            number_of_keys: config.number_of_keys,
            black_key_width_scale: config.black_key_width_scale,
            black_key_height_scale: config.black_key_height_scale,
            stroke_width: config.key_stroke_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFill {
    White,
    Black,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedKey {
    pub index: KeyIndex,
    pub rect: KeyRect,
    pub fill: KeyFill,
}

/// Pressed color wins over the key's own class color.
pub fn key_fill(index: KeyIndex, pressed: &PressedKeys) -> KeyFill {
    if pressed.is_pressed(index) {
        KeyFill::Pressed
    } else if keys::is_white(index) {
        KeyFill::White
    } else {
        KeyFill::Black
    }
}

/// Saturates a layout coordinate into pixel range.
fn px(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rects for every key of the keyboard at one widget size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    width: i32,
    height: i32,
    stroke_width: i32,
    counts: KeyCounts,
    dims: KeyDimensions,
    rects: Vec<KeyRect>,
}

impl Layout {
    /// Lays out `params.number_of_keys` keys across a `width` x `height` widget.
    ///
    /// White keys tile the width from the left and share `stroke_width` pixels
    /// with their neighbours. Black keys sit centered on the right edge of the
    /// white key before them. `number_of_keys` must be at least 1.
    pub fn compute(width: u32, height: u32, params: LayoutParams) -> Self {
        let width = i64::from(width.min(i32::MAX as u32));
        let height = i64::from(height.min(i32::MAX as u32));
        let n = params.number_of_keys.max(1);
        let counts = keys::count_keys(n);

        // Products of the stroke width and key counts leave the i32 range for
        // large strokes, so positions are worked out in i64 and clamped at the end.
        let w = counts.white as i64;
        let s = i64::from(params.stroke_width.min(i32::MAX as u32));
        let bws = params.black_key_width_scale;
        let rightmost_is_white = keys::is_white(n - 1);

        let white_key_width = if rightmost_is_white {
            (width + (w - 1) * s) / w
        } else {
            // A trailing black key takes half its width beyond the last white key.
            ((2 * width + 2 * w * s - s) as f32 / ((2 * w) as f32 + bws)) as i64
        };
        let black_key_width = (white_key_width as f32 * bws).round() as i64;
        let black_key_height = (height as f32 * params.black_key_height_scale).round() as i64;

        let tiled = white_key_width * w - s * (w - 1);
        let width_remainder = if rightmost_is_white {
            width - tiled
        } else {
            width - (tiled + (black_key_width / 2 - s / 2))
        }
        .max(0);

        // (left, right) of every key.
        let mut spans = vec![(0i64, 0i64); n];

        let mut left = 0;
        for ordinal in 0..counts.white {
            let key_width = if (ordinal as i64) < width_remainder {
                white_key_width + 1
            } else {
                white_key_width
            };
            spans[white_key_index(ordinal)] = (left, left + key_width);
            left += key_width - s;
        }

        for ordinal in 0..counts.black {
            let ix = black_key_index(ordinal);
            // ix - 1 is always white and already placed.
            let left = spans[ix - 1].1 - black_key_width / 2 - s / 2;
            spans[ix] = (left, left + black_key_width);
        }

        // Rounding can push the rightmost key one pixel past the widget.
        let last = &mut spans[n - 1];
        last.1 = last.1.min(width);

        let rects = spans
            .iter()
            .enumerate()
            .map(|(ix, &(left, right))| {
                let bottom = if keys::is_white(ix) { height } else { black_key_height };
                KeyRect::new(px(left), 0, px(right), px(bottom))
            })
            .collect();

        let (width, height, s) = (px(width), px(height), px(s));
        let (white_key_width, black_key_width, black_key_height, width_remainder) = (
            px(white_key_width),
            px(black_key_width),
            px(black_key_height),
            px(width_remainder),
        );

        let dims = KeyDimensions {
            white_key_width,
            white_key_height: height,
            black_key_width,
            black_key_height,
            width_remainder,
        };

        debug!(
            "Layout {}x{}: {} white / {} black keys, dims {:?}",
            width, height, counts.white, counts.black, dims
        );

        Self {
            width,
            height,
            stroke_width: s,
            counts,
            dims,
            rects,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stroke_width(&self) -> i32 {
        self.stroke_width
    }

    pub fn counts(&self) -> KeyCounts {
        self.counts
    }

    pub fn dimensions(&self) -> KeyDimensions {
        self.dims
    }

    pub fn number_of_keys(&self) -> usize {
        self.rects.len()
    }

    pub fn keys(&self) -> &[KeyRect] {
        &self.rects
    }

    pub fn bounds(&self, index: KeyIndex) -> Option<KeyRect> {
        self.rects.get(index).copied()
    }

    pub fn white_keys(&self) -> impl Iterator<Item = (KeyIndex, KeyRect)> + '_ {
        (0..self.counts.white).map(move |o| {
            let ix = white_key_index(o);
            (ix, self.rects[ix])
        })
    }

    pub fn black_keys(&self) -> impl Iterator<Item = (KeyIndex, KeyRect)> + '_ {
        (0..self.counts.black).map(move |o| {
            let ix = black_key_index(o);
            (ix, self.rects[ix])
        })
    }

    /// Keys in drawing order: white keys, then the black keys on top of them.
    pub fn paint_order<'a>(
        &'a self,
        pressed: &'a PressedKeys,
    ) -> impl Iterator<Item = PaintedKey> + 'a {
        self.white_keys()
            .chain(self.black_keys())
            .map(move |(index, rect)| PaintedKey {
                index,
                rect,
                fill: key_fill(index, pressed),
            })
    }
}
