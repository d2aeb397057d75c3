use egui::{Key, Pos2};

/// Longest gap between the two clicks of a double click, in seconds.
pub const DOUBLE_CLICK_WINDOW: f64 = 0.25;
/// Farthest the pointer may travel between the two clicks of a double click.
pub const DOUBLE_CLICK_DISTANCE: f32 = 5.0;
/// How long an arrow key must be held before it starts repeating.
pub const REPEAT_DELAY: f64 = 0.5;
/// Interval between repeats once an arrow key repeats.
pub const REPEAT_INTERVAL: f64 = 0.1;

const TIME_EPSILON: f64 = 1e-9;

/// What a click turned out to be, as far as can be told right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The click waits for the double-click window to pass. A previous pending click
    /// that can no longer become a double click is handed back as `flushed`.
    Pending { flushed: Option<Pos2> },
    /// Second click of a double click; the first click is consumed with it.
    Double(Pos2),
}

/// Tells single clicks from double clicks using explicit timestamps.
///
/// A single click is only confirmed by [`poll`](Self::poll) once the window has
/// elapsed without a second click.
#[derive(Debug, Clone)]
pub struct ClickCounter {
    window: f64,
    max_distance: f32,
    pending: Option<(Pos2, f64)>,
}

impl Default for ClickCounter {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}

impl ClickCounter {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            max_distance: DOUBLE_CLICK_DISTANCE,
            pending: None,
        }
    }

    pub fn register(&mut self, pos: Pos2, time: f64) -> ClickOutcome {
        match self.pending.take() {
            Some((first, at)) if time - at <= self.window && first.distance(pos) <= self.max_distance => {
                ClickOutcome::Double(pos)
            }
            previous => {
                self.pending = Some((pos, time));
                ClickOutcome::Pending {
                    flushed: previous.map(|(p, _)| p),
                }
            }
        }
    }

    /// Confirms the pending click as a single click once the window has passed.
    pub fn poll(&mut self, now: f64) -> Option<Pos2> {
        match self.pending {
            Some((pos, at)) if now - at > self.window => {
                self.pending = None;
                Some(pos)
            }
            _ => None,
        }
    }

    /// Confirms the pending click right away, if there is one.
    pub fn flush(&mut self) -> Option<Pos2> {
        self.pending.take().map(|(pos, _)| pos)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Pos2> {
        self.pending.map(|(pos, _)| pos)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Arrow-key repeat timing, independent of the OS auto-repeat.
///
/// The first press fires once. OS repeats of a held key are swallowed; after
/// [`REPEAT_DELAY`] the key fires every [`REPEAT_INTERVAL`] from [`poll`](Self::poll).
#[derive(Debug, Clone, Default)]
pub struct KeyRepeatGuard {
    held: Option<HeldKey>,
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: Key,
    pressed_at: f64,
    last_fired: f64,
}

impl KeyRepeatGuard {
    /// Returns `true` when the press should act, `false` for a repeat of a held key.
    pub fn press(&mut self, key: Key, time: f64) -> bool {
        if self.held.is_some_and(|held| held.key == key) {
            return false;
        }
        self.held = Some(HeldKey {
            key,
            pressed_at: time,
            last_fired: time,
        });
        true
    }

    pub fn release(&mut self, key: Key) {
        if self.held.is_some_and(|held| held.key == key) {
            self.held = None;
        }
    }

    pub fn poll(&mut self, now: f64) -> Option<Key> {
        let held = self.held.as_mut()?;
        let delay_passed = now - held.pressed_at >= REPEAT_DELAY - TIME_EPSILON;
        let interval_passed = now - held.last_fired >= REPEAT_INTERVAL - TIME_EPSILON;
        if delay_passed && interval_passed {
            held.last_fired = now;
            Some(held.key)
        } else {
            None
        }
    }

    pub fn held_key(&self) -> Option<Key> {
        self.held.map(|held| held.key)
    }

    pub fn clear(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_single_click_is_confirmed_after_window() {
        let mut clicks = ClickCounter::default();
        assert_eq!(clicks.register(pos2(1.0, 1.0), 0.0), ClickOutcome::Pending { flushed: None });
        assert_eq!(clicks.poll(0.2), None);
        assert_eq!(clicks.poll(0.3), Some(pos2(1.0, 1.0)));
        assert_eq!(clicks.poll(0.4), None);
    }

    #[test]
    fn test_double_click_consumes_both_clicks() {
        let mut clicks = ClickCounter::default();
        clicks.register(pos2(3.0, 2.0), 2.0);
        assert_eq!(clicks.register(pos2(3.0, 2.0), 2.1), ClickOutcome::Double(pos2(3.0, 2.0)));
        assert!(!clicks.is_pending());
        assert_eq!(clicks.poll(5.0), None);
    }

    #[test]
    fn test_far_second_click_flushes_first() {
        let mut clicks = ClickCounter::default();
        clicks.register(pos2(0.0, 0.0), 0.0);
        assert_eq!(
            clicks.register(pos2(50.0, 0.0), 0.1),
            ClickOutcome::Pending {
                flushed: Some(pos2(0.0, 0.0))
            }
        );
        assert!(clicks.is_pending());
    }

    #[test]
    fn test_key_repeat_timing() {
        let mut guard = KeyRepeatGuard::default();
        assert!(guard.press(Key::ArrowLeft, 0.0));
        // OS auto-repeat while held
        assert!(!guard.press(Key::ArrowLeft, 0.03));
        assert_eq!(guard.poll(0.3), None);
        assert_eq!(guard.poll(0.5), Some(Key::ArrowLeft));
        assert_eq!(guard.poll(0.55), None);
        assert_eq!(guard.poll(0.6), Some(Key::ArrowLeft));

        guard.release(Key::ArrowLeft);
        assert_eq!(guard.poll(2.0), None);
        assert!(guard.press(Key::ArrowLeft, 2.0));
    }
}
