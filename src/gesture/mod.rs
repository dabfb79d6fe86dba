//! Pointer gestures to key events.
//!
//! The host feeds a normalized pointer stream into a [`GestureDispatcher`].
//! Each event is resolved against the current [`Layout`], applied to the
//! pressed-key store according to the [`ShowPressMode`], and reported to
//! the listeners as [`KeyEvent`]s in the order they happen.

use crate::config::ShowPressMode;
use crate::geometry::{hit, Layout};
use crate::keys::KeyIndex;
use crate::listener::{KeyEvent, ListenerRegistry};
use crate::press::PressedKeys;
use serde::{Deserialize, Serialize};

pub mod multi;
pub mod single;

pub use multi::MultiTouch;
pub use single::SingleTouch;

pub type PointerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(Pointer),
    /// One or more pointers changed position.
    Move { pointers: Vec<Pointer> },
    Up(Pointer),
    Cancel { id: PointerId },
}

impl PointerEvent {
    pub fn down(id: PointerId, x: f32, y: f32) -> Self {
        PointerEvent::Down(Pointer::new(id, x, y))
    }

    pub fn moved(id: PointerId, x: f32, y: f32) -> Self {
        PointerEvent::Move {
            pointers: vec![Pointer::new(id, x, y)],
        }
    }

    pub fn up(id: PointerId, x: f32, y: f32) -> Self {
        PointerEvent::Up(Pointer::new(id, x, y))
    }

    pub fn cancel(id: PointerId) -> Self {
        PointerEvent::Cancel { id }
    }
}

/// Everything a strategy touches while handling one pointer event.
pub struct GestureContext<'a> {
    pub layout: Option<&'a Layout>,
    pub mode: ShowPressMode,
    pub pressed: &'a mut PressedKeys,
    pub listeners: &'a mut ListenerRegistry,
    pub emitted: Vec<KeyEvent>,
}

impl<'a> GestureContext<'a> {
    pub fn new(
        layout: Option<&'a Layout>,
        mode: ShowPressMode,
        pressed: &'a mut PressedKeys,
        listeners: &'a mut ListenerRegistry,
    ) -> Self {
        Self {
            layout,
            mode,
            pressed,
            listeners,
            emitted: Vec::new(),
        }
    }

    pub fn locate(&self, pointer: &Pointer) -> Option<KeyIndex> {
        self.layout
            .and_then(|layout| hit::locate_point(layout, pointer.x, pointer.y))
    }

    pub(crate) fn key_down(&mut self, key: KeyIndex) {
        if self.mode == ShowPressMode::OnKeyDown {
            self.pressed.press(key);
        }
        self.emit(KeyEvent::Down(key));
    }

    pub(crate) fn key_up(&mut self, key: KeyIndex) {
        if self.mode == ShowPressMode::OnKeyDown {
            self.pressed.unpress(key);
        }
        self.emit(KeyEvent::Up(key));
    }

    pub(crate) fn key_click(&mut self, key: KeyIndex) {
        if self.mode == ShowPressMode::OnKeyClick {
            self.pressed.toggle(key);
        }
        self.emit(KeyEvent::Click(key));
    }

    fn emit(&mut self, event: KeyEvent) {
        self.emitted.push(event);
        self.listeners.emit(event, self.pressed);
    }
}

/// A way of turning pointer events into key events.
pub trait TouchStrategy {
    fn handle(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>);

    /// Releases held keys at or above `number_of_keys`. Pointers on them stay
    /// tracked but resolve to no key until they move.
    fn retain_below(&mut self, number_of_keys: usize, ctx: &mut GestureContext<'_>);

    /// Releases every held key without clicks and forgets all pointers.
    fn release_all(&mut self, ctx: &mut GestureContext<'_>);

    fn active_pointers(&self) -> usize;
}

/// Picks the single- or multi-pointer strategy.
#[derive(Debug, Clone)]
pub enum GestureDispatcher {
    Single(SingleTouch),
    Multi(MultiTouch),
}

impl GestureDispatcher {
    pub fn new(multi_pointer: bool) -> Self {
        if multi_pointer {
            GestureDispatcher::Multi(MultiTouch::default())
        } else {
            GestureDispatcher::Single(SingleTouch::default())
        }
    }

    pub fn is_multi_pointer(&self) -> bool {
        matches!(self, GestureDispatcher::Multi(_))
    }

    fn strategy(&mut self) -> &mut dyn TouchStrategy {
        match self {
            GestureDispatcher::Single(s) => s,
            GestureDispatcher::Multi(m) => m,
        }
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) {
        self.strategy().handle(event, ctx);
    }

    pub fn retain_below(&mut self, number_of_keys: usize, ctx: &mut GestureContext<'_>) {
        self.strategy().retain_below(number_of_keys, ctx);
    }

    pub fn release_all(&mut self, ctx: &mut GestureContext<'_>) {
        self.strategy().release_all(ctx);
    }

    pub fn active_pointers(&self) -> usize {
        match self {
            GestureDispatcher::Single(s) => s.active_pointers(),
            GestureDispatcher::Multi(m) => m.active_pointers(),
        }
    }
}
