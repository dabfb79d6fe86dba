use pianokeys::geometry::{KeyFill, KeyRect, Layout, LayoutParams};
use pianokeys::keys::{self, count_keys};
use pianokeys::press::PressedKeys;
use rstest::rstest;

fn params(n: usize, stroke: u32, bws: f32, bhs: f32) -> LayoutParams {
    LayoutParams {
        number_of_keys: n,
        black_key_width_scale: bws,
        black_key_height_scale: bhs,
        stroke_width: stroke,
    }
}

// One octave C..B, 700px wide, 2px strokes.
fn octave_layout() -> Layout {
    Layout::compute(700, 200, params(12, 2, 0.5, 0.6))
}

#[rstest]
#[case(1, 1, 0)]
#[case(2, 1, 1)]
#[case(12, 7, 5)]
#[case(13, 8, 5)]
#[case(24, 14, 10)]
#[case(88, 51, 37)]
fn test_key_counts(#[case] n: usize, #[case] white: usize, #[case] black: usize) {
    let counts = count_keys(n);
    assert_eq!((counts.white, counts.black), (white, black));
    assert_eq!(counts.total(), n);
}

#[test]
fn test_octave_dimensions() {
    let dims = octave_layout().dimensions();
    assert_eq!(dims.white_key_width, 101);
    assert_eq!(dims.width_remainder, 5);
    assert_eq!(dims.black_key_width, 51);
    assert_eq!(dims.white_key_height, 200);
    assert_eq!(dims.black_key_height, 120);
}

#[test]
fn test_octave_rects() {
    let layout = octave_layout();
    let expected = [
        KeyRect::new(0, 0, 102, 200),
        KeyRect::new(76, 0, 127, 120),
        KeyRect::new(100, 0, 202, 200),
        KeyRect::new(176, 0, 227, 120),
        KeyRect::new(200, 0, 302, 200),
        KeyRect::new(300, 0, 402, 200),
        KeyRect::new(376, 0, 427, 120),
        KeyRect::new(400, 0, 502, 200),
        KeyRect::new(476, 0, 527, 120),
        KeyRect::new(500, 0, 601, 200),
        KeyRect::new(575, 0, 626, 120),
        KeyRect::new(599, 0, 700, 200),
    ];
    assert_eq!(layout.keys(), &expected);
}

#[test]
fn test_single_key_spans_widget() {
    let layout = Layout::compute(300, 80, params(1, 3, 0.6, 0.6));
    assert_eq!(layout.counts().black, 0);
    assert_eq!(layout.keys(), &[KeyRect::new(0, 0, 300, 80)]);
}

#[test]
fn test_trailing_black_key() {
    // C, C#: the black key overhangs the single white key and ends at the edge.
    let layout = Layout::compute(100, 50, params(2, 0, 0.5, 0.5));
    let dims = layout.dimensions();
    assert_eq!(dims.white_key_width, 80);
    assert_eq!(dims.black_key_width, 40);
    assert_eq!(dims.width_remainder, 0);
    assert_eq!(layout.bounds(0), Some(KeyRect::new(0, 0, 80, 50)));
    assert_eq!(layout.bounds(1), Some(KeyRect::new(60, 0, 100, 25)));
}

#[rstest]
#[case(11)]
#[case(23)]
#[case(37)]
#[case(88)]
fn test_trailing_black_key_never_overshoots(#[case] n: usize) {
    assert!(keys::is_black(n - 1));
    for width in [640, 701, 999, 1280, 1921] {
        let layout = Layout::compute(width, 120, params(n, 2, 0.6, 0.6));
        let last = layout.bounds(n - 1).unwrap();
        assert!(last.right <= width as i32, "n={} width={}", n, width);
    }
}

#[rstest]
#[case(12, 0)]
#[case(12, 2)]
#[case(24, 1)]
#[case(61, 3)]
fn test_black_keys_straddle_white_boundary(#[case] n: usize, #[case] stroke: u32) {
    let layout = Layout::compute(1200, 200, params(n, stroke, 0.6, 0.6));
    let bkw = layout.dimensions().black_key_width;
    let s = stroke as i32;
    for (ix, rect) in layout.black_keys() {
        if ix == n - 1 {
            continue; // may be clipped
        }
        let white_right = layout.bounds(ix - 1).unwrap().right;
        assert_eq!(rect.left + bkw / 2 + s / 2, white_right, "black key {}", ix);
        assert_eq!(rect.width(), bkw);
    }
}

#[test]
fn test_recompute_is_idempotent() {
    let p = params(49, 2, 0.55, 0.62);
    assert_eq!(Layout::compute(1037, 211, p), Layout::compute(1037, 211, p));
}

#[test]
fn test_paint_order_whites_then_blacks() {
    let layout = octave_layout();
    let mut pressed = PressedKeys::new(true);
    pressed.press(3);
    pressed.press(4);

    let painted: Vec<_> = layout.paint_order(&pressed).collect();
    let order: Vec<usize> = painted.iter().map(|p| p.index).collect();
    assert_eq!(order, vec![0, 2, 4, 5, 7, 9, 11, 1, 3, 6, 8, 10]);

    let fill_of = |ix: usize| painted.iter().find(|p| p.index == ix).unwrap().fill;
    assert_eq!(fill_of(0), KeyFill::White);
    assert_eq!(fill_of(1), KeyFill::Black);
    assert_eq!(fill_of(3), KeyFill::Pressed);
    assert_eq!(fill_of(4), KeyFill::Pressed);
}
