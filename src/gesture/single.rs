use super::{GestureContext, PointerEvent, PointerId, TouchStrategy};
use crate::keys::KeyIndex;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Tracking {
        pointer: PointerId,
        current_key: Option<KeyIndex>,
        has_left_initial_key: bool,
    },
}

/// Follows the first pointer down and ignores the rest until it lifts.
#[derive(Debug, Clone, Default)]
pub struct SingleTouch {
    state: State,
}

impl SingleTouch {
    pub fn tracked_key(&self) -> Option<KeyIndex> {
        match self.state {
            State::Tracking { current_key, .. } => current_key,
            State::Idle => None,
        }
    }

    fn finish(&mut self, id: PointerId, ctx: &mut GestureContext<'_>) {
        let State::Tracking {
            pointer,
            current_key,
            has_left_initial_key,
        } = self.state
        else {
            return;
        };
        if pointer != id {
            return;
        }
        if let Some(key) = current_key {
            ctx.key_up(key);
            if !has_left_initial_key {
                ctx.key_click(key);
            }
        }
        trace!("pointer {} released", id);
        self.state = State::Idle;
    }
}

impl TouchStrategy for SingleTouch {
    fn handle(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) {
        match event {
            PointerEvent::Down(p) => {
                if self.state != State::Idle {
                    trace!("ignoring secondary pointer {}", p.id);
                    return;
                }
                let key = ctx.locate(p);
                if let Some(k) = key {
                    ctx.key_down(k);
                }
                self.state = State::Tracking {
                    pointer: p.id,
                    current_key: key,
                    has_left_initial_key: false,
                };
            }
            PointerEvent::Move { pointers } => {
                let State::Tracking {
                    pointer,
                    current_key,
                    ..
                } = self.state
                else {
                    return;
                };
                let Some(p) = pointers.iter().find(|p| p.id == pointer) else {
                    return;
                };
                let new_key = ctx.locate(p);
                if new_key == current_key {
                    return;
                }
                trace!("pointer {} moved {:?} -> {:?}", pointer, current_key, new_key);
                if let Some(old) = current_key {
                    ctx.key_up(old);
                }
                if let Some(new) = new_key {
                    ctx.key_down(new);
                }
                self.state = State::Tracking {
                    pointer,
                    current_key: new_key,
                    has_left_initial_key: true,
                };
            }
            PointerEvent::Up(p) => self.finish(p.id, ctx),
            PointerEvent::Cancel { id } => self.finish(*id, ctx),
        }
    }

    fn retain_below(&mut self, number_of_keys: usize, ctx: &mut GestureContext<'_>) {
        if let State::Tracking { current_key, .. } = &mut self.state {
            if let Some(key) = current_key.filter(|&k| k >= number_of_keys) {
                *current_key = None;
                ctx.key_up(key);
            }
        }
    }

    fn release_all(&mut self, ctx: &mut GestureContext<'_>) {
        if let State::Tracking {
            current_key: Some(key),
            ..
        } = self.state
        {
            ctx.key_up(key);
        }
        self.state = State::Idle;
    }

    fn active_pointers(&self) -> usize {
        match self.state {
            State::Idle => 0,
            State::Tracking { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShowPressMode;
    use crate::geometry::{Layout, LayoutParams};
    use crate::listener::{KeyEvent, ListenerRegistry};
    use crate::press::PressedKeys;

    #[test]
    fn without_layout_only_tracks_pointer() {
        let mut pressed = PressedKeys::new(false);
        let mut listeners = ListenerRegistry::default();
        let mut ctx = GestureContext::new(None, ShowPressMode::OnKeyDown, &mut pressed, &mut listeners);
        let mut touch = SingleTouch::default();

        touch.handle(&PointerEvent::down(3, 10.0, 10.0), &mut ctx);
        assert_eq!(touch.active_pointers(), 1);
        assert_eq!(touch.tracked_key(), None);

        touch.handle(&PointerEvent::up(3, 10.0, 10.0), &mut ctx);
        assert_eq!(touch.active_pointers(), 0);
        assert_eq!(ctx.emitted, Vec::<KeyEvent>::new());
    }

    #[test]
    fn release_all_lifts_tracked_key_without_click() {
        let layout = Layout::compute(
            700,
            200,
            LayoutParams {
                number_of_keys: 12,
                black_key_width_scale: 0.5,
                black_key_height_scale: 0.6,
                stroke_width: 2,
            },
        );
        let mut pressed = PressedKeys::new(false);
        let mut listeners = ListenerRegistry::default();
        let mut ctx = GestureContext::new(
            Some(&layout),
            ShowPressMode::OnKeyDown,
            &mut pressed,
            &mut listeners,
        );
        let mut touch = SingleTouch::default();

        touch.handle(&PointerEvent::down(0, 50.0, 180.0), &mut ctx);
        touch.release_all(&mut ctx);
        assert_eq!(ctx.emitted, vec![KeyEvent::Down(0), KeyEvent::Up(0)]);
        assert_eq!(touch.active_pointers(), 0);

        touch.handle(&PointerEvent::up(0, 50.0, 180.0), &mut ctx);
        assert_eq!(ctx.emitted.len(), 2);
        drop(ctx);
        assert!(pressed.is_empty());
    }
}
