use super::Layout;
use crate::keys::{black_key_index, white_key_index, KeyIndex};

/// Returns the key under `(x, y)`, or `None` when the point misses every key.
///
/// Black keys are drawn over white keys, so they are tested first. Adjacent
/// white keys overlap by the stroke width; every white key but the last gives
/// up the right half of that shared border, which leaves the overlap to the
/// left key.
pub fn locate(layout: &Layout, x: i32, y: i32) -> Option<KeyIndex> {
    let counts = layout.counts();
    let rects = layout.keys();

    for ordinal in 0..counts.black {
        let ix = black_key_index(ordinal);
        if rects[ix].contains(x, y) {
            return Some(ix);
        }
    }

    let half_stroke = layout.stroke_width() / 2;
    for ordinal in 0..counts.white {
        let ix = white_key_index(ordinal);
        let mut rect = rects[ix];
        if ordinal + 1 < counts.white {
            rect.right = rect.right.saturating_sub(half_stroke);
        }
        if rect.contains(x, y) {
            return Some(ix);
        }
    }

    None
}

/// Same as [`locate`] for pointer coordinates, rounded to the nearest pixel.
pub fn locate_point(layout: &Layout, x: f32, y: f32) -> Option<KeyIndex> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    locate(layout, x.round() as i32, y.round() as i32)
}
