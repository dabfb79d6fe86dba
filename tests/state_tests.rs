use pianokeys::config::{KeyColor, PianoConfig, ShowPressMode};
use pianokeys::error::PianoError;
use pianokeys::gesture::PointerEvent;
use pianokeys::state::SavedState;
use pianokeys::view::PianoView;

fn customized() -> PianoView {
    let config = PianoConfig {
        number_of_keys: 36,
        black_key_width_scale: 0.55,
        black_key_height_scale: 0.7,
        key_stroke_width: 3,
        key_corner_radius: 6,
        pressed_key_color: KeyColor(0xFF33AA55),
        show_press_mode: ShowPressMode::OnKeyClick,
        ..Default::default()
    };
    let mut piano = PianoView::new(config).unwrap();
    piano.resize(900, 160);
    piano.show_keys_pressed(&[4, 17, 30], false);
    piano
}

#[test]
fn test_restore_recreates_widget() {
    let original = customized();
    let saved = original.save_state();

    let mut restored = PianoView::new(PianoConfig::default()).unwrap();
    restored.restore_state(saved).unwrap();

    assert_eq!(restored.config(), original.config());
    assert_eq!(restored.pressed_keys().to_vec(), vec![4, 17, 30]);

    // Geometry waits for the host to report a size.
    assert!(restored.layout().is_none());
    restored.resize(900, 160);
    assert_eq!(restored.layout(), original.layout());
}

#[test]
fn test_json_uses_camel_case_keys() {
    let json = customized().save_state().to_json().unwrap();
    for key in [
        "\"pressedKeys\"",
        "\"showPressMode\"",
        "\"enableMultiKeyHighlighting\"",
        "\"numberOfKeys\"",
        "\"keyStrokeColor\"",
        "\"blackKeyHeightScale\"",
    ] {
        assert!(json.contains(key), "missing {} in {}", key, json);
    }
    assert!(json.contains("\"#FF33AA55\""));
    assert!(json.contains("\"on_key_click\""));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let saved = customized().save_state();

    saved.save_to_file(&path).unwrap();
    assert_eq!(SavedState::load_from_file(&path).unwrap(), saved);
}

#[test]
fn test_restore_rejects_invalid_state() {
    let mut piano = customized();
    let mut state = piano.save_state();
    state.number_of_keys = 120;
    state.pressed_keys = vec![1];

    assert!(matches!(
        piano.restore_state(state),
        Err(PianoError::InvalidConfiguration(_))
    ));
    assert_eq!(piano.number_of_keys(), 36);
    assert_eq!(piano.pressed_keys().to_vec(), vec![4, 17, 30]);
    assert!(piano.layout().is_some());
}

#[test]
fn test_restore_drops_out_of_range_keys() {
    let mut state = customized().save_state();
    state.number_of_keys = 12;

    let mut piano = PianoView::new(PianoConfig::default()).unwrap();
    piano.restore_state(state).unwrap();
    assert_eq!(piano.pressed_keys().to_vec(), vec![4]);
}

#[test]
fn test_restore_single_highlight_keeps_one_key() {
    let mut state = customized().save_state();
    state.enable_multi_key_highlighting = false;

    let mut piano = PianoView::new(PianoConfig::default()).unwrap();
    piano.restore_state(state).unwrap();
    assert_eq!(piano.pressed_keys().len(), 1);
}

#[test]
fn test_restore_resets_gestures() {
    let mut piano = customized();
    let saved = piano.save_state();
    piano.handle_pointer(PointerEvent::down(0, 20.0, 150.0));
    assert_eq!(piano.active_pointers(), 1);

    piano.restore_state(saved).unwrap();
    assert_eq!(piano.active_pointers(), 0);
    assert_eq!(piano.handle_pointer(PointerEvent::up(0, 20.0, 150.0)), vec![]);
}

#[test]
fn test_malformed_state_json() {
    assert!(matches!(
        SavedState::from_json("{\"numberOfKeys\": 12}"),
        Err(PianoError::Json(_))
    ));
}
