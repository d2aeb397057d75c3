//! Translation of egui input into canvas events, and dispatch to the editor.

use egui::{Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

pub mod gestures;
pub mod router;

pub use gestures::{ClickCounter, ClickOutcome, KeyRepeatGuard};
pub use router::{InputRouter, ShellRequest};

/// A pointer event in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    /// The pressed or released button; for moves, the first held button
    /// (primary when none is held)
    pub button: PointerButton,
    pub modifiers: Modifiers,
    /// Seconds, on the same clock as [`InputRouter::tick`]
    pub time: f64,
}

impl PointerEvent {
    pub fn new(pos: Pos2, button: PointerButton, time: f64) -> Self {
        Self {
            pos,
            button,
            modifiers: Modifiers::NONE,
            time,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.button == PointerButton::Secondary
    }
}

/// Input events in the editor's own terms.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Wheel {
        delta: Vec2,
        modifiers: Modifiers,
        time: f64,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        /// Set for key-downs generated by OS auto-repeat
        repeat: bool,
        time: f64,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
        time: f64,
    },
    /// Shift, Alt or Ctrl changed without any other key
    ModifiersChanged {
        modifiers: Modifiers,
        time: f64,
    },
}

impl InputEvent {
    pub fn time(&self) -> f64 {
        match self {
            InputEvent::PointerDown(e) | InputEvent::PointerMove(e) | InputEvent::PointerUp(e) => e.time,
            InputEvent::Wheel { time, .. }
            | InputEvent::KeyDown { time, .. }
            | InputEvent::KeyUp { time, .. }
            | InputEvent::ModifiersChanged { time, .. } => *time,
        }
    }
}

/// Converts raw egui input into [`InputEvent`]s relative to the canvas.
///
/// A gesture that starts on the canvas keeps receiving moves and the release even
/// when the pointer leaves it. Presses outside the canvas are ignored.
#[derive(Debug, Default)]
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    last_pointer_pos: Option<Pos2>,
    held_buttons: Vec<PointerButton>,
    last_modifiers: Modifiers,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen rectangle the canvas is painted in, at one screen point per pixel.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Whether a pointer button went down on the canvas and has not been released.
    pub fn is_capturing(&self) -> bool {
        !self.held_buttons.is_empty()
    }

    /// Collects this frame's events from egui.
    pub fn process_input(&mut self, ctx: &egui::Context) -> Vec<InputEvent> {
        let keyboard_free = !ctx.wants_keyboard_input();
        ctx.input(|i| self.translate(&i.events, i.modifiers, i.time, keyboard_free))
    }

    /// Converts one frame of raw egui events. Key events are only produced when
    /// `keyboard_free` is set, i.e. no text field has focus.
    pub fn translate(
        &mut self,
        raw: &[egui::Event],
        modifiers: Modifiers,
        time: f64,
        keyboard_free: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let Some(canvas) = self.canvas_rect else {
            return events;
        };
        let to_canvas = |pos: Pos2| (pos - canvas.min).to_pos2();

        if keyboard_free && modifiers != self.last_modifiers {
            events.push(InputEvent::ModifiersChanged { modifiers, time });
        }
        self.last_modifiers = modifiers;

        // Clipboard shortcuts may arrive both as a clipboard event and as the raw key.
        let mut clipboard_keys: Vec<Key> = Vec::new();

        for event in raw {
            match event {
                egui::Event::PointerMoved(pos) => {
                    self.last_pointer_pos = Some(*pos);
                    if canvas.contains(*pos) || self.is_capturing() {
                        let button = self.held_buttons.first().copied().unwrap_or(PointerButton::Primary);
                        events.push(InputEvent::PointerMove(
                            PointerEvent::new(to_canvas(*pos), button, time).with_modifiers(modifiers),
                        ));
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    modifiers,
                } => {
                    let pointer = PointerEvent::new(to_canvas(*pos), *button, time).with_modifiers(*modifiers);
                    if *pressed {
                        if canvas.contains(*pos) && !self.held_buttons.contains(button) {
                            self.held_buttons.push(*button);
                            events.push(InputEvent::PointerDown(pointer));
                        }
                    } else if let Some(index) = self.held_buttons.iter().position(|b| b == button) {
                        self.held_buttons.remove(index);
                        events.push(InputEvent::PointerUp(pointer));
                    }
                }
                egui::Event::MouseWheel { delta, modifiers, .. } => {
                    let over_canvas = self.last_pointer_pos.is_some_and(|p| canvas.contains(p));
                    if over_canvas {
                        events.push(InputEvent::Wheel {
                            delta: *delta,
                            modifiers: *modifiers,
                            time,
                        });
                    }
                }
                egui::Event::Copy | egui::Event::Cut | egui::Event::Paste(_) if keyboard_free => {
                    let key = match event {
                        egui::Event::Copy => Key::C,
                        egui::Event::Cut => Key::X,
                        _ => Key::V,
                    };
                    if !clipboard_keys.contains(&key) {
                        clipboard_keys.push(key);
                        events.push(InputEvent::KeyDown {
                            key,
                            modifiers: modifiers | Modifiers::COMMAND,
                            repeat: false,
                            time,
                        });
                    }
                }
                egui::Event::Key {
                    key,
                    pressed,
                    repeat,
                    modifiers,
                    ..
                } if keyboard_free => {
                    if *pressed {
                        let is_clipboard_key = matches!(key, Key::C | Key::X | Key::V) && modifiers.command;
                        if is_clipboard_key {
                            if clipboard_keys.contains(key) {
                                continue;
                            }
                            clipboard_keys.push(*key);
                        }
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                            repeat: *repeat,
                            time,
                        });
                    } else {
                        events.push(InputEvent::KeyUp {
                            key: *key,
                            modifiers: *modifiers,
                            time,
                        });
                    }
                }
                _ => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, pos2};

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_size(pos2(100.0, 50.0), Vec2::splat(200.0)));
        handler
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_positions_are_canvas_relative() {
        let mut handler = handler();
        let events = handler.translate(&[button(pos2(110.0, 60.0), true)], Modifiers::NONE, 1.0, true);
        assert_eq!(
            events,
            vec![InputEvent::PointerDown(PointerEvent::new(pos2(10.0, 10.0), PointerButton::Primary, 1.0))]
        );
    }

    #[test]
    fn test_gesture_is_captured_outside_canvas() {
        let mut handler = handler();
        handler.translate(&[button(pos2(110.0, 60.0), true)], Modifiers::NONE, 0.0, true);
        let events = handler.translate(
            &[Event::PointerMoved(pos2(400.0, 60.0)), button(pos2(400.0, 60.0), false)],
            Modifiers::NONE,
            0.1,
            true,
        );
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], InputEvent::PointerUp(e) if e.pos == pos2(300.0, 10.0)));
        assert!(!handler.is_capturing());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut handler = handler();
        let events = handler.translate(&[button(pos2(10.0, 10.0), true)], Modifiers::NONE, 0.0, true);
        assert!(events.is_empty());
    }

    #[test]
    fn test_copy_event_and_raw_key_produce_one_key_down() {
        let mut handler = handler();
        let raw = [
            Event::Copy,
            Event::Key {
                key: Key::C,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::COMMAND,
            },
        ];
        let events = handler.translate(&raw, Modifiers::COMMAND, 0.0, true);
        let key_downs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, InputEvent::KeyDown { key: Key::C, .. }))
            .collect();
        assert_eq!(key_downs.len(), 1);
    }

    #[test]
    fn test_modifier_changes_are_reported_once() {
        let mut handler = handler();
        let first = handler.translate(&[], Modifiers::SHIFT, 0.0, true);
        assert_eq!(first, vec![InputEvent::ModifiersChanged { modifiers: Modifiers::SHIFT, time: 0.0 }]);
        assert!(handler.translate(&[], Modifiers::SHIFT, 0.1, true).is_empty());
    }
}
