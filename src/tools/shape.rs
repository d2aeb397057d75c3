use egui::{Key, Modifiers, Pos2, Rect};

use super::{Tool, draw_preview};
use crate::command::{Command, EllipseCommand, RectangleCommand};
use crate::geometry::{closest_square, rect_from_points};
use crate::input::PointerEvent;
use crate::state::EditorContext;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeState {
    Idle,
    Drawing { start: Pos2, end: Pos2, style: Style },
}

/// Drag-to-draw rectangles and ellipses. Shift keeps the box square.
#[derive(Debug)]
pub struct ShapeTool {
    shape: ShapeKind,
    state: ShapeState,
    shift: bool,
}

impl ShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            state: ShapeState::Idle,
            shift: false,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn state(&self) -> ShapeState {
        self.state
    }

    fn command(&self, start: Pos2, end: Pos2, style: Style) -> Command {
        let (start, end) = if self.shift { closest_square(start, end) } else { (start, end) };
        match self.shape {
            ShapeKind::Rectangle => RectangleCommand::new(style).with_corners(start, end).into(),
            ShapeKind::Ellipse => EllipseCommand::new(style).with_corners(start, end).into(),
        }
    }

    fn redraw(&self, ctx: &mut EditorContext) {
        if let ShapeState::Drawing { start, end, style } = self.state {
            draw_preview(ctx, self.command(start, end, style));
        }
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.shape {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
        }
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() || self.is_busy() {
            return;
        }
        ctx.begin_gesture();
        self.shift = event.modifiers.shift;
        self.state = ShapeState::Drawing {
            start: event.pos,
            end: event.pos,
            style: ctx.style,
        };
        self.redraw(ctx);
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if let ShapeState::Drawing { end, .. } = &mut self.state {
            *end = event.pos;
            self.redraw(ctx);
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        let ShapeState::Drawing { start, style, .. } = self.state else {
            return;
        };
        self.state = ShapeState::Idle;

        let (start, end) = if self.shift { closest_square(start, event.pos) } else { (start, event.pos) };
        let bounds: Rect = rect_from_points(start, end);
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            log::debug!("Empty {} discarded", self.name());
            ctx.cancel_gesture();
            return;
        }
        ctx.commit(self.command(start, end, style));
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _time: f64, ctx: &mut EditorContext) -> bool {
        if key == Key::Escape && self.is_busy() {
            self.cancel(ctx);
            return true;
        }
        false
    }

    fn on_modifiers_changed(&mut self, modifiers: Modifiers, ctx: &mut EditorContext) {
        if self.shift != modifiers.shift {
            self.shift = modifiers.shift;
            self.redraw(ctx);
        }
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        if self.is_busy() {
            ctx.cancel_gesture();
        }
        self.state = ShapeState::Idle;
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, ShapeState::Drawing { .. })
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            ShapeState::Idle => "Idle",
            ShapeState::Drawing { .. } => "Drawing",
        }
    }
}
