use egui::{Key, Modifiers, Pos2};

use super::anchored::{AnchoredPath, Press};
use super::{CLOSE_DISTANCE, Tool, draw_preview};
use crate::command::{LineCommand, PolygonCommand};
use crate::geometry::is_within;
use crate::input::PointerEvent;
use crate::state::EditorContext;
use crate::style::Style;

/// Smallest number of vertices a polygon is committed with.
const MIN_VERTICES: usize = 3;

/// Click-anchored polygon. A click near the first vertex (once there are three) or a
/// double click anywhere closes it.
#[derive(Debug, Default)]
pub struct PolygonTool {
    path: AnchoredPath,
    style: Style,
}

impl PolygonTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Pos2] {
        self.path.points()
    }

    fn redraw(&self, ctx: &mut EditorContext) {
        let points = self.path.preview_points();
        if points.len() >= MIN_VERTICES {
            draw_preview(ctx, PolygonCommand::new(self.style).with_points(points));
        } else {
            // Not a polygon yet, show the edges placed so far.
            let outline = Style {
                primary_color: self.style.outline_color().unwrap_or(self.style.primary_color),
                ..self.style
            };
            draw_preview(ctx, LineCommand::new(outline).with_points(points));
        }
    }

    /// Adds a confirmed vertex, closing the polygon when it lands on the start.
    fn add_vertex(&mut self, pos: Pos2, ctx: &mut EditorContext) {
        let pos = self.path.constrain(pos);
        let closes = self.path.points().len() >= MIN_VERTICES
            && self.path.first().is_some_and(|start| is_within(pos, start, CLOSE_DISTANCE));
        if closes {
            self.finish(ctx);
        } else {
            self.path.push_exact(pos);
            self.redraw(ctx);
        }
    }

    fn finish(&mut self, ctx: &mut EditorContext) {
        let points = self.path.take();
        if points.len() < MIN_VERTICES {
            log::debug!("Polygon needs at least {MIN_VERTICES} vertices, discarding");
            ctx.cancel_gesture();
            return;
        }
        ctx.commit(PolygonCommand::new(self.style).with_points(points));
    }
}

impl Tool for PolygonTool {
    fn name(&self) -> &'static str {
        "Polygon"
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
            Press::Pending { confirmed } => match confirmed {
                Some(pos) => self.add_vertex(pos, ctx),
                None => self.redraw(ctx),
            },
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
        let pos = self.path.constrain(pos);
        let near_start = self.path.first().is_some_and(|start| is_within(pos, start, CLOSE_DISTANCE));
        if !near_start {
            self.path.push_exact(pos);
        }
        self.finish(ctx);
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
                self.finish(ctx);
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
            self.add_vertex(pos, ctx);
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
