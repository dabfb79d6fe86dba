use crate::keys::KeyIndex;
use crate::press::PressedKeys;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic key notification produced from pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum KeyEvent {
    Down(KeyIndex),
    Up(KeyIndex),
    /// Pointer went down and up without ever resolving to another key.
    Click(KeyIndex),
}

impl KeyEvent {
    pub fn key(&self) -> KeyIndex {
        match *self {
            KeyEvent::Down(k) | KeyEvent::Up(k) | KeyEvent::Click(k) => k,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Down(k) => write!(f, "key_down({})", k),
            KeyEvent::Up(k) => write!(f, "key_up({})", k),
            KeyEvent::Click(k) => write!(f, "key_click({})", k),
        }
    }
}

/// Receives key notifications. Each callback gets the pressed-key store so a
/// listener can drive the highlight by hand.
pub trait PianoListener {
    fn on_key_down(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        let _ = (keys, key);
    }

    fn on_key_up(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        let _ = (keys, key);
    }

    fn on_key_click(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        let _ = (keys, key);
    }
}

impl<F> PianoListener for F
where
    F: FnMut(KeyEvent, &mut PressedKeys),
{
    fn on_key_down(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        self(KeyEvent::Down(key), keys)
    }

    fn on_key_up(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        self(KeyEvent::Up(key), keys)
    }

    fn on_key_click(&mut self, keys: &mut PressedKeys, key: KeyIndex) {
        self(KeyEvent::Click(key), keys)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn PianoListener>)>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn add(&mut self, listener: Box<dyn PianoListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: KeyEvent, keys: &mut PressedKeys) {
        for (_, listener) in &mut self.listeners {
            match event {
                KeyEvent::Down(k) => listener.on_key_down(keys, k),
                KeyEvent::Up(k) => listener.on_key_up(keys, k),
                KeyEvent::Click(k) => listener.on_key_click(keys, k),
            }
        }
    }
}
