use egui::{Key, Modifiers, Pos2};

use super::anchored::{AnchoredPath, Press};
use super::{CLOSE_DISTANCE, Tool, draw_preview};
use crate::command::LineCommand;
use crate::geometry::is_within;
use crate::input::PointerEvent;
use crate::state::EditorContext;
use crate::style::Style;

/// Polyline tool. Each confirmed click adds a vertex; a double click finishes the
/// line, closing it onto its start when the double click lands near it.
#[derive(Debug, Default)]
pub struct LineTool {
    path: AnchoredPath,
    style: Style,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Pos2] {
        self.path.points()
    }

    fn build(&self, points: Vec<Pos2>, ctx: &EditorContext) -> LineCommand {
        let mut command = LineCommand::new(self.style).with_points(points);
        command.set_junction(ctx.settings.line_junction_diameter);
        command
    }

    fn redraw(&self, ctx: &mut EditorContext) {
        let command = self.build(self.path.preview_points(), ctx);
        draw_preview(ctx, command);
    }

    /// Ends the polyline, appending `last` (or the start, when `last` is near it).
    fn finish(&mut self, last: Option<Pos2>, ctx: &mut EditorContext) {
        let last = last.map(|pos| self.path.constrain(pos));
        let mut points = self.path.take();
        if let Some(pos) = last {
            match points.first() {
                Some(start) if is_within(pos, *start, CLOSE_DISTANCE) => points.push(*start),
                _ => points.push(pos),
            }
        }

        if points.len() < 2 {
            log::debug!("Line needs at least two points, discarding");
            ctx.cancel_gesture();
            return;
        }
        let command = self.build(points, ctx);
        ctx.commit(command);
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        if !self.is_busy() {
            ctx.begin_gesture();
            self.style = ctx.style;
        }
        match self.path.press(event.pos, event.time) {
            Press::Pending { confirmed } => {
                if let Some(pos) = confirmed {
                    self.path.push(pos);
                }
                self.redraw(ctx);
            }
            Press::Double(pos) => self.on_double_click(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        self.path.set_cursor(event.pos);
        if self.is_busy() {
            self.redraw(ctx);
        }
    }

    fn on_pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut EditorContext) {}

    fn on_double_click(&mut self, pos: Pos2, ctx: &mut EditorContext) {
        self.finish(Some(pos), ctx);
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _time: f64, ctx: &mut EditorContext) -> bool {
        if !self.is_busy() {
            return false;
        }
        match key {
            Key::Escape => self.cancel(ctx),
            Key::Backspace => {
                if self.path.pop().is_none() {
                    self.cancel(ctx);
                } else {
                    self.redraw(ctx);
                }
            }
            Key::Enter => {
                if let Some(pos) = self.path.flush() {
                    self.path.push(pos);
                }
                self.finish(None, ctx);
            }
            _ => return false,
        }
        true
    }

    fn on_modifiers_changed(&mut self, modifiers: Modifiers, ctx: &mut EditorContext) {
        self.path.set_shift(modifiers.shift);
        if self.is_busy() {
            self.redraw(ctx);
        }
    }

    fn on_tick(&mut self, now: f64, ctx: &mut EditorContext) {
        if let Some(pos) = self.path.poll(now) {
            self.path.push(pos);
            self.redraw(ctx);
        }
    }

    fn wants_ticks(&self) -> bool {
        self.path.is_pending()
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        if self.is_busy() {
            ctx.cancel_gesture();
        }
        self.path.reset();
    }

    fn is_busy(&self) -> bool {
        !self.path.is_empty()
    }

    fn state_name(&self) -> &'static str {
        if self.is_busy() { "Placing" } else { "Idle" }
    }
}

