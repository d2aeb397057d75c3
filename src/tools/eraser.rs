use egui::{Key, Modifiers, Pos2};

use super::Tool;
use crate::command::EraserCommand;
use crate::input::PointerEvent;
use crate::state::EditorContext;
use crate::surface::{Cap, StrokeStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum EraserState {
    Idle,
    Erasing { size: f32, points: Vec<Pos2> },
}

/// Drag to punch square-tipped holes into the drawing.
#[derive(Debug)]
pub struct EraserTool {
    state: EraserState,
}

impl Default for EraserTool {
    fn default() -> Self {
        Self::new()
    }
}

impl EraserTool {
    pub fn new() -> Self {
        Self {
            state: EraserState::Idle,
        }
    }

    /// The preview cannot punch through the base surface, so it paints the erased
    /// path in the background colour instead.
    fn redraw(&self, ctx: &mut EditorContext) {
        if let EraserState::Erasing { size, points } = &self.state {
            let stroke = StrokeStyle::new(ctx.document.background_color(), *size).with_cap(Cap::Square);
            let preview = ctx.document.preview_mut();
            preview.clear();
            preview.stroke_polyline(points, false, &stroke);
        }
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() || self.is_busy() {
            return;
        }
        ctx.begin_gesture();
        self.state = EraserState::Erasing {
            size: ctx.settings.eraser_size,
            points: vec![event.pos],
        };
        self.redraw(ctx);
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if let EraserState::Erasing { points, .. } = &mut self.state {
            if points.last() != Some(&event.pos) {
                points.push(event.pos);
                self.redraw(ctx);
            }
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        if let EraserState::Erasing { size, mut points } = std::mem::replace(&mut self.state, EraserState::Idle) {
            if points.last() != Some(&event.pos) {
                points.push(event.pos);
            }
            ctx.commit(EraserCommand::new(size).with_points(points));
        }
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _time: f64, ctx: &mut EditorContext) -> bool {
        if key == Key::Escape && self.is_busy() {
            self.cancel(ctx);
            return true;
        }
        false
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        if self.is_busy() {
            ctx.cancel_gesture();
        }
        self.state = EraserState::Idle;
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, EraserState::Erasing { .. })
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            EraserState::Idle => "Idle",
            EraserState::Erasing { .. } => "Erasing",
        }
    }
}
