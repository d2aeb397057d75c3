use egui::{Key, Modifiers};

use super::{Tool, draw_preview};
use crate::command::LineCommand;
use crate::input::PointerEvent;
use crate::state::EditorContext;

#[derive(Debug, Clone, PartialEq)]
pub enum PencilState {
    Idle,
    Drawing { command: LineCommand },
}

/// Freehand drawing: every pointer position of a drag becomes a path vertex.
#[derive(Debug)]
pub struct PencilTool {
    state: PencilState,
}

impl Default for PencilTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PencilTool {
    pub fn new() -> Self {
        Self {
            state: PencilState::Idle,
        }
    }

    pub fn state(&self) -> &PencilState {
        &self.state
    }
}

impl Tool for PencilTool {
    fn name(&self) -> &'static str {
        "Pencil"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() || self.is_busy() {
            return;
        }
        ctx.begin_gesture();
        let command = LineCommand::new(ctx.style).with_points(vec![event.pos]);
        draw_preview(ctx, command.clone());
        self.state = PencilState::Drawing { command };
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if let PencilState::Drawing { command } = &mut self.state {
            if command.points().last() == Some(&event.pos) {
                return;
            }
            command.push_point(event.pos);
            draw_preview(ctx, command.clone());
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        if let PencilState::Drawing { mut command } = std::mem::replace(&mut self.state, PencilState::Idle) {
            if command.points().last() != Some(&event.pos) {
                command.push_point(event.pos);
            }
            log::debug!("Pencil path with {} points", command.points().len());
            ctx.commit(command);
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
        self.state = PencilState::Idle;
    }

    fn is_busy(&self) -> bool {
        !matches!(self.state, PencilState::Idle)
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            PencilState::Idle => "Idle",
            PencilState::Drawing { .. } => "Drawing",
        }
    }
}
