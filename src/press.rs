use crate::keys::KeyIndex;
use std::collections::BTreeSet;
use tracing::trace;

/// Keys currently shown in the pressed color.
///
/// With multi-key highlighting disabled at most one key is pressed at a time:
/// pressing a key first releases every other one. Any effective change raises
/// a redraw flag that the host collects with [`PressedKeys::take_needs_redraw`].
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: BTreeSet<KeyIndex>,
    // Press order, oldest first.
    order: Vec<KeyIndex>,
    multi: bool,
    needs_redraw: bool,
}

impl PressedKeys {
    pub fn new(multi_key_highlighting: bool) -> Self {
        Self {
            multi: multi_key_highlighting,
            ..Default::default()
        }
    }

    pub fn is_multi_key_highlighting(&self) -> bool {
        self.multi
    }

    pub fn is_pressed(&self, key: KeyIndex) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pressed keys in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = KeyIndex> + '_ {
        self.keys.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<KeyIndex> {
        self.iter().collect()
    }

    /// The key pressed most recently that is still pressed.
    pub fn most_recent(&self) -> Option<KeyIndex> {
        self.order.last().copied()
    }

    /// Returns `false` if the key was already pressed.
    pub fn press(&mut self, key: KeyIndex) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        if !self.multi && !self.keys.is_empty() {
            let others: Vec<KeyIndex> = self.order.clone();
            for other in others {
                self.unpress(other);
            }
        }
        self.keys.insert(key);
        self.order.push(key);
        self.needs_redraw = true;
        trace!("pressed key {}", key);
        true
    }

    /// Returns `false` if the key was not pressed.
    pub fn unpress(&mut self, key: KeyIndex) -> bool {
        if !self.keys.remove(&key) {
            return false;
        }
        self.order.retain(|&k| k != key);
        self.needs_redraw = true;
        trace!("unpressed key {}", key);
        true
    }

    /// Flips the pressed state of `key` and returns the new state.
    pub fn toggle(&mut self, key: KeyIndex) -> bool {
        if self.is_pressed(key) {
            self.unpress(key);
            false
        } else {
            self.press(key);
            true
        }
    }

    pub fn clear(&mut self) {
        if !self.keys.is_empty() {
            self.keys.clear();
            self.order.clear();
            self.needs_redraw = true;
        }
    }

    /// Disabling keeps only the most recently pressed key.
    pub fn set_multi_key_highlighting(&mut self, enabled: bool) {
        self.multi = enabled;
        if enabled {
            return;
        }
        if let Some(keep) = self.most_recent() {
            let stale: Vec<KeyIndex> = self.keys.iter().copied().filter(|&k| k != keep).collect();
            for key in stale {
                self.unpress(key);
            }
        }
    }

    /// Drops keys that no longer exist after the key count shrank.
    pub fn retain_below(&mut self, number_of_keys: usize) {
        let stale: Vec<KeyIndex> = self.keys.range(number_of_keys..).copied().collect();
        for key in stale {
            self.unpress(key);
        }
    }

    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
