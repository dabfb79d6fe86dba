use crate::config::{self, KeyColor, PianoConfig, ShowPressMode};
use crate::error::PkResult;
use crate::geometry::{self, KeyFill, KeyRect, Layout, PaintedKey};
use crate::gesture::{GestureContext, GestureDispatcher, PointerEvent};
use crate::keys::{self, KeyIndex};
use crate::listener::{KeyEvent, ListenerId, ListenerRegistry, PianoListener};
use crate::press::PressedKeys;
use crate::state::SavedState;
use tracing::debug;

/// A piano keyboard widget without a drawing surface.
///
/// The host reports size changes with [`PianoView::resize`] and pointer input
/// with [`PianoView::handle_pointer`], then repaints from
/// [`PianoView::paint_order`] whenever [`PianoView::take_needs_redraw`] says so.
#[derive(Debug)]
pub struct PianoView {
    config: PianoConfig,
    size: Option<(u32, u32)>,
    layout: Option<Layout>,
    pressed: PressedKeys,
    gestures: GestureDispatcher,
    listeners: ListenerRegistry,
    needs_redraw: bool,
}

impl PianoView {
    pub fn new(config: PianoConfig) -> PkResult<Self> {
        config.validate()?;
        let multi = config.enable_multi_key_highlighting;
        Ok(Self {
            config,
            size: None,
            layout: None,
            pressed: PressedKeys::new(multi),
            gestures: GestureDispatcher::new(multi),
            listeners: ListenerRegistry::default(),
            needs_redraw: true,
        })
    }

    pub fn config(&self) -> &PianoConfig {
        &self.config
    }

    // === HOST LIFECYCLE ===

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
        self.relayout();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<KeyEvent> {
        let mut ctx = GestureContext::new(
            self.layout.as_ref(),
            self.config.show_press_mode,
            &mut self.pressed,
            &mut self.listeners,
        );
        self.gestures.handle(&event, &mut ctx);
        ctx.emitted
    }

    /// Lifts every key held by a pointer, emitting `Up` but no clicks, and
    /// forgets all pointers.
    fn release_gestures(&mut self) {
        let mut ctx = GestureContext::new(
            self.layout.as_ref(),
            self.config.show_press_mode,
            &mut self.pressed,
            &mut self.listeners,
        );
        self.gestures.release_all(&mut ctx);
    }

    pub fn take_needs_redraw(&mut self) -> bool {
        let pressed_changed = self.pressed.take_needs_redraw();
        std::mem::take(&mut self.needs_redraw) || pressed_changed
    }

    fn relayout(&mut self) {
        self.layout = match self.size {
            Some((w, h)) if w > 0 && h > 0 => {
                Some(Layout::compute(w, h, (&self.config).into()))
            }
            _ => None,
        };
        self.needs_redraw = true;
    }

    // === QUERIES ===

    pub fn number_of_keys(&self) -> usize {
        self.config.number_of_keys
    }

    pub fn number_of_white_keys(&self) -> usize {
        keys::count_keys(self.config.number_of_keys).white
    }

    pub fn number_of_black_keys(&self) -> usize {
        keys::count_keys(self.config.number_of_keys).black
    }

    pub fn key_is_pressed(&self, index: KeyIndex) -> bool {
        self.pressed.is_pressed(index)
    }

    pub fn pressed_keys(&self) -> &PressedKeys {
        &self.pressed
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn bounds_for_key(&self, index: KeyIndex) -> Option<KeyRect> {
        self.layout.as_ref().and_then(|l| l.bounds(index))
    }

    pub fn active_pointers(&self) -> usize {
        self.gestures.active_pointers()
    }

    pub fn key_fill(&self, index: KeyIndex) -> KeyFill {
        geometry::key_fill(index, &self.pressed)
    }

    pub fn key_color(&self, index: KeyIndex) -> KeyColor {
        match self.key_fill(index) {
            KeyFill::White => self.config.white_key_color,
            KeyFill::Black => self.config.black_key_color,
            KeyFill::Pressed => self.config.pressed_key_color,
        }
    }

    /// White keys then black keys, each with its current fill. Empty until
    /// the first non-zero [`PianoView::resize`].
    pub fn paint_order(&self) -> Vec<PaintedKey> {
        match &self.layout {
            Some(layout) => layout.paint_order(&self.pressed).collect(),
            None => Vec::new(),
        }
    }

    // === MANUAL HIGHLIGHTING ===

    pub fn show_key_pressed(&mut self, index: KeyIndex) -> bool {
        index < self.config.number_of_keys && self.pressed.press(index)
    }

    pub fn show_key_not_pressed(&mut self, index: KeyIndex) -> bool {
        self.pressed.unpress(index)
    }

    /// Presses every key in `keys`. With `exclusive`, all other keys are released first.
    pub fn show_keys_pressed(&mut self, keys: &[KeyIndex], exclusive: bool) {
        if exclusive {
            for key in self.pressed.to_vec() {
                if !keys.contains(&key) {
                    self.pressed.unpress(key);
                }
            }
        }
        for &key in keys {
            self.show_key_pressed(key);
        }
    }

    // === LISTENERS ===

    pub fn add_listener<L: PianoListener + 'static>(&mut self, listener: L) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // === CONFIGURATION ===

    pub fn set_number_of_keys(&mut self, number_of_keys: usize) -> PkResult<()> {
        config::validate_number_of_keys(number_of_keys)?;
        if number_of_keys == self.config.number_of_keys {
            return Ok(());
        }
        debug!(
            "numberOfKeys {} -> {}",
            self.config.number_of_keys, number_of_keys
        );
        let mut ctx = GestureContext::new(
            self.layout.as_ref(),
            self.config.show_press_mode,
            &mut self.pressed,
            &mut self.listeners,
        );
        self.gestures.retain_below(number_of_keys, &mut ctx);
        self.config.number_of_keys = number_of_keys;
        self.pressed.retain_below(number_of_keys);
        self.relayout();
        Ok(())
    }

    pub fn set_black_key_width_scale(&mut self, scale: f32) -> PkResult<()> {
        config::validate_scale("blackKeyWidthScale", scale)?;
        if scale == self.config.black_key_width_scale {
            return Ok(());
        }
        self.config.black_key_width_scale = scale;
        self.relayout();
        Ok(())
    }

    pub fn set_black_key_height_scale(&mut self, scale: f32) -> PkResult<()> {
        config::validate_scale("blackKeyHeightScale", scale)?;
        if scale == self.config.black_key_height_scale {
            return Ok(());
        }
        self.config.black_key_height_scale = scale;
        self.relayout();
        Ok(())
    }

    /// Strokes of neighbouring keys overlap, so this changes the layout.
    pub fn set_key_stroke_width(&mut self, width: u32) {
        if width == self.config.key_stroke_width {
            return;
        }
        self.config.key_stroke_width = width;
        self.relayout();
    }

    pub fn set_key_corner_radius(&mut self, radius: u32) {
        if radius != self.config.key_corner_radius {
            self.config.key_corner_radius = radius;
            self.needs_redraw = true;
        }
    }

    pub fn set_white_key_color(&mut self, color: KeyColor) {
        if color != self.config.white_key_color {
            self.config.white_key_color = color;
            self.needs_redraw = true;
        }
    }

    pub fn set_black_key_color(&mut self, color: KeyColor) {
        if color != self.config.black_key_color {
            self.config.black_key_color = color;
            self.needs_redraw = true;
        }
    }

    pub fn set_pressed_key_color(&mut self, color: KeyColor) {
        if color != self.config.pressed_key_color {
            self.config.pressed_key_color = color;
            self.needs_redraw = true;
        }
    }

    pub fn set_key_stroke_color(&mut self, color: KeyColor) {
        if color != self.config.key_stroke_color {
            self.config.key_stroke_color = color;
            self.needs_redraw = true;
        }
    }

    pub fn set_show_press_mode(&mut self, mode: ShowPressMode) {
        debug!("showPressMode {} -> {}", self.config.show_press_mode, mode);
        self.config.show_press_mode = mode;
    }

    /// Also selects the pointer strategy. Keys held by pointers in flight are
    /// released first: listeners get an `Up` for each, but no click.
    pub fn set_enable_multi_key_highlighting(&mut self, enabled: bool) {
        if enabled == self.config.enable_multi_key_highlighting {
            return;
        }
        debug!("multi-key highlighting -> {}", enabled);
        self.release_gestures();
        self.config.enable_multi_key_highlighting = enabled;
        self.pressed.set_multi_key_highlighting(enabled);
        self.gestures = GestureDispatcher::new(enabled);
    }

    // === PERSISTENCE ===

    pub fn save_state(&self) -> SavedState {
        SavedState::capture(&self.config, &self.pressed)
    }

    /// Restores configuration and pressed keys. The layout is rebuilt on the
    /// next [`PianoView::resize`], once the host knows the widget size.
    pub fn restore_state(&mut self, state: SavedState) -> PkResult<()> {
        let config = state.config();
        config.validate()?;
        self.release_gestures();

        let multi = config.enable_multi_key_highlighting;
        let mut pressed = PressedKeys::new(multi);
        for key in state
            .pressed_keys
            .iter()
            .copied()
            .filter(|&k| k < config.number_of_keys)
        {
            pressed.press(key);
        }

        self.config = config;
        self.pressed = pressed;
        self.gestures = GestureDispatcher::new(multi);
        self.layout = None;
        self.needs_redraw = true;
        Ok(())
    }
}
