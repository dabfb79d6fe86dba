use super::{GestureContext, PointerEvent, PointerId, TouchStrategy};
use crate::keys::KeyIndex;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointerTrack {
    current_key: Option<KeyIndex>,
    has_left_initial_key: bool,
}

/// Tracks every pointer independently.
///
/// A key goes down when the first pointer lands on it and up when the last
/// one leaves, so the set of pointers on a key decides its state regardless
/// of the order the host reports them in.
#[derive(Debug, Clone, Default)]
pub struct MultiTouch {
    tracks: HashMap<PointerId, PointerTrack>,
    refcounts: HashMap<KeyIndex, u32>,
}

impl MultiTouch {
    /// Number of pointers currently resolving to `key`.
    pub fn touches_on(&self, key: KeyIndex) -> u32 {
        self.refcounts.get(&key).copied().unwrap_or(0)
    }

    fn release(&mut self, id: PointerId, ctx: &mut GestureContext<'_>) {
        let Some(track) = self.tracks.remove(&id) else {
            return;
        };
        if let Some(key) = track.current_key {
            leave(&mut self.refcounts, key, ctx);
            if !track.has_left_initial_key {
                ctx.key_click(key);
            }
        }
        trace!("pointer {} released", id);
    }
}

fn enter(refcounts: &mut HashMap<KeyIndex, u32>, key: KeyIndex, ctx: &mut GestureContext<'_>) {
    let count = refcounts.entry(key).or_insert(0);
    *count += 1;
    if *count == 1 {
        ctx.key_down(key);
    }
}

fn leave(refcounts: &mut HashMap<KeyIndex, u32>, key: KeyIndex, ctx: &mut GestureContext<'_>) {
    let Some(count) = refcounts.get_mut(&key) else {
        return;
    };
    *count -= 1;
    if *count == 0 {
        refcounts.remove(&key);
        ctx.key_up(key);
    }
}

impl TouchStrategy for MultiTouch {
    fn handle(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) {
        match event {
            PointerEvent::Down(p) => {
                if self.tracks.contains_key(&p.id) {
                    trace!("duplicate down for pointer {}", p.id);
                    return;
                }
                let key = ctx.locate(p);
                self.tracks.insert(
                    p.id,
                    PointerTrack {
                        current_key: key,
                        has_left_initial_key: false,
                    },
                );
                if let Some(k) = key {
                    enter(&mut self.refcounts, k, ctx);
                }
            }
            PointerEvent::Move { pointers } => {
                for p in pointers {
                    let Some(track) = self.tracks.get_mut(&p.id) else {
                        continue;
                    };
                    let new_key = ctx.locate(p);
                    if new_key == track.current_key {
                        continue;
                    }
                    trace!(
                        "pointer {} moved {:?} -> {:?}",
                        p.id,
                        track.current_key,
                        new_key
                    );
                    let old_key = std::mem::replace(&mut track.current_key, new_key);
                    track.has_left_initial_key = true;
                    if let Some(old) = old_key {
                        leave(&mut self.refcounts, old, ctx);
                    }
                    if let Some(new) = new_key {
                        enter(&mut self.refcounts, new, ctx);
                    }
                }
            }
            PointerEvent::Up(p) => self.release(p.id, ctx),
            PointerEvent::Cancel { id } => self.release(*id, ctx),
        }
    }

    fn retain_below(&mut self, number_of_keys: usize, ctx: &mut GestureContext<'_>) {
        for track in self.tracks.values_mut() {
            if track.current_key.is_some_and(|k| k >= number_of_keys) {
                track.current_key = None;
            }
        }
        let mut removed: Vec<KeyIndex> = self
            .refcounts
            .keys()
            .copied()
            .filter(|&k| k >= number_of_keys)
            .collect();
        removed.sort_unstable();
        for key in removed {
            self.refcounts.remove(&key);
            ctx.key_up(key);
        }
    }

    fn release_all(&mut self, ctx: &mut GestureContext<'_>) {
        let mut held: Vec<KeyIndex> = self.refcounts.drain().map(|(k, _)| k).collect();
        held.sort_unstable();
        for key in held {
            ctx.key_up(key);
        }
        self.tracks.clear();
    }

    fn active_pointers(&self) -> usize {
        self.tracks.len()
    }
}
