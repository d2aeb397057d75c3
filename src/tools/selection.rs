use std::sync::Arc;

use egui::{Color32, Key, Modifiers, Pos2, Rect, Vec2, vec2};

use super::Tool;
use crate::command::{SelectionCommand, SelectionShape};
use crate::event::{EditorEvent, SelectionEvent};
use crate::geometry::{Anchor, HANDLE_SIZE, anchor_at, clamp_to_pixels, rect_from_points, resize_rect};
use crate::input::{KeyRepeatGuard, PointerEvent};
use crate::state::EditorContext;
use crate::surface::{Clip, CompositeMode, ImageData, StrokeStyle, Surface, mask_to_ellipse};

/// Distance moved by one arrow key press when magnetism is off.
pub const ARROW_STEP: f32 = 3.0;

/// Lifted pixels floating above the drawing.
#[derive(Clone, PartialEq)]
pub struct Selection {
    /// Where the pixels came from; `None` for pasted content
    pub source: Option<Rect>,
    pub bounds: Rect,
    pub pixels: Arc<ImageData>,
}

impl Selection {
    /// The pixels as they appear on screen, re-scaled to the current bounds.
    pub fn visible_pixels(&self, shape: SelectionShape) -> Arc<ImageData> {
        let width = self.bounds.width().round().max(1.0) as u32;
        let height = self.bounds.height().round().max(1.0) as u32;
        if self.pixels.dimensions() == (width, height) {
            return Arc::clone(&self.pixels);
        }
        let Ok(mut surface) = Surface::new(width, height) else {
            return Arc::clone(&self.pixels);
        };
        let dest = surface.bounds();
        let clip = match shape {
            SelectionShape::Rectangle => None,
            SelectionShape::Ellipse => Some(Clip::Ellipse(dest)),
        };
        surface.draw_image(&self.pixels, dest, 0.0, clip);
        Arc::new(surface.to_image_data())
    }
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("source", &self.source)
            .field("bounds", &self.bounds)
            .field("pixels", &self.pixels.dimensions())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Selecting {
        start: Pos2,
        end: Pos2,
    },
    Selected(Selection),
    Moving {
        selection: Selection,
        /// Pointer position when the move started
        grab: Pos2,
        /// Bounds when the move started
        origin: Rect,
    },
    Resizing {
        selection: Selection,
        handle: Anchor,
        origin: Rect,
    },
}

impl SelectionState {
    fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionState::Selected(selection)
            | SelectionState::Moving { selection, .. }
            | SelectionState::Resizing { selection, .. } => Some(selection),
            _ => None,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut Selection> {
        match self {
            SelectionState::Selected(selection)
            | SelectionState::Moving { selection, .. }
            | SelectionState::Resizing { selection, .. } => Some(selection),
            _ => None,
        }
    }

    fn into_selection(self) -> Option<Selection> {
        match self {
            SelectionState::Selected(selection)
            | SelectionState::Moving { selection, .. }
            | SelectionState::Resizing { selection, .. } => Some(selection),
            _ => None,
        }
    }
}

/// Rectangle or ellipse selection.
///
/// Dragging on an empty canvas marks a region; releasing lifts its pixels. The
/// lifted pixels can be moved (drag inside), resized (drag a handle), nudged with
/// the arrow keys, deleted, copied or cut. Nothing touches the base surface until
/// the selection is committed, which records a single [`SelectionCommand`]. The
/// history stays muted while a selection floats.
#[derive(Debug)]
pub struct SelectionTool {
    shape: SelectionShape,
    state: SelectionState,
    arrows: KeyRepeatGuard,
}

impl SelectionTool {
    pub fn new(shape: SelectionShape) -> Self {
        Self {
            shape,
            state: SelectionState::Idle,
            arrows: KeyRepeatGuard::default(),
        }
    }

    pub fn shape(&self) -> SelectionShape {
        self.shape
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection()
    }

    fn emit(ctx: &EditorContext, event: SelectionEvent) {
        ctx.emit(EditorEvent::SelectionChanged(event));
    }

    fn float(&mut self, selection: Selection, ctx: &mut EditorContext) {
        ctx.begin_gesture();
        let bounds = selection.bounds;
        self.state = SelectionState::Selected(selection);
        Self::emit(ctx, SelectionEvent::Created { bounds });
        self.redraw(ctx);
    }

    /// Lifts the whole canvas.
    pub fn select_all(&mut self, ctx: &mut EditorContext) {
        self.commit_selection(ctx);
        let bounds = ctx.document.bounds();
        let mut pixels = ctx.document.base().get_image_data(bounds);
        if self.shape == SelectionShape::Ellipse {
            mask_to_ellipse(&mut pixels);
        }
        self.float(
            Selection {
                source: Some(bounds),
                bounds,
                pixels: Arc::new(pixels),
            },
            ctx,
        );
    }

    /// Floats the clipboard content as a new selection. Successive pastes cascade
    /// down and to the right.
    pub fn paste(&mut self, ctx: &mut EditorContext) -> bool {
        self.commit_selection(ctx);
        let Some((content, position)) = ctx.clipboard.paste(Pos2::ZERO) else {
            log::debug!("Nothing to paste");
            return false;
        };
        let size = vec2(content.pixels.width() as f32, content.pixels.height() as f32);
        self.float(
            Selection {
                source: None,
                bounds: Rect::from_min_size(position, size),
                pixels: content.pixels,
            },
            ctx,
        );
        true
    }

    pub fn copy(&mut self, ctx: &mut EditorContext) -> bool {
        let Some(selection) = self.state.selection() else {
            return false;
        };
        ctx.clipboard.copy(selection.visible_pixels(self.shape), self.shape);
        ctx.emit(EditorEvent::ClipboardChanged);
        true
    }

    pub fn cut(&mut self, ctx: &mut EditorContext) -> bool {
        self.copy(ctx) && self.delete(ctx)
    }

    /// Paints the source region with the background colour and drops the pixels.
    pub fn delete(&mut self, ctx: &mut EditorContext) -> bool {
        if self.state.selection().is_none() {
            return false;
        }
        let Some(selection) = std::mem::replace(&mut self.state, SelectionState::Idle).into_selection() else {
            return false;
        };
        self.arrows.clear();
        match selection.source {
            Some(source) => {
                let mut command = SelectionCommand::new(self.shape, ctx.document.background_color());
                command.set_source(Some(source));
                ctx.commit(command);
            }
            // Pasted content has nothing underneath to erase.
            None => ctx.cancel_gesture(),
        }
        Self::emit(ctx, SelectionEvent::Deleted);
        true
    }

    /// Writes the floating selection into the drawing and returns to idle. A
    /// selection that was never moved or resized records nothing.
    pub fn commit_selection(&mut self, ctx: &mut EditorContext) {
        if self.state.selection().is_none() {
            // A drag still in progress is abandoned along with its outline.
            if matches!(self.state, SelectionState::Selecting { .. }) {
                self.cancel(ctx);
            }
            return;
        }
        let Some(selection) = std::mem::replace(&mut self.state, SelectionState::Idle).into_selection() else {
            return;
        };
        self.arrows.clear();

        let mut command = SelectionCommand::new(self.shape, ctx.document.background_color());
        command.set_source(selection.source);
        command.set_pixels(Some(selection.pixels));
        command.set_destination(Some(selection.bounds));
        if command.is_noop() {
            ctx.cancel_gesture();
            Self::emit(ctx, SelectionEvent::Cleared);
        } else {
            ctx.commit(command);
            Self::emit(ctx, SelectionEvent::Committed);
        }
    }

    fn nudge(&mut self, key: Key, ctx: &mut EditorContext) {
        let direction = match key {
            Key::ArrowLeft => vec2(-1.0, 0.0),
            Key::ArrowRight => vec2(1.0, 0.0),
            Key::ArrowUp => vec2(0.0, -1.0),
            Key::ArrowDown => vec2(0.0, 1.0),
            _ => return,
        };
        let magnetism = ctx.magnetism;
        let spacing = ctx.grid_spacing();
        let Some(selection) = self.state.selection_mut() else {
            return;
        };
        let delta = if magnetism.enabled {
            magnetism.nudge(selection.bounds, direction, spacing)
        } else {
            direction * ARROW_STEP
        };
        selection.bounds = selection.bounds.translate(delta);
        let bounds = selection.bounds;
        Self::emit(ctx, SelectionEvent::Moved { bounds });
        self.redraw(ctx);
    }

    fn outline(&self, surface: &mut Surface, rect: Rect) {
        let stroke = StrokeStyle::new(Color32::BLACK, 1.0).dashed();
        match self.shape {
            SelectionShape::Rectangle => surface.stroke_rect(rect, &stroke),
            SelectionShape::Ellipse => {
                surface.stroke_ellipse(rect, &stroke);
                surface.stroke_rect(rect, &StrokeStyle::new(Color32::GRAY, 1.0).dashed());
            }
        }
    }

    fn redraw(&self, ctx: &mut EditorContext) {
        let background = ctx.document.background_color();
        let preview = ctx.document.preview_mut();
        preview.clear();
        match &self.state {
            SelectionState::Idle => {}
            SelectionState::Selecting { start, end } => self.outline(preview, rect_from_points(*start, *end)),
            _ => {
                let Some(selection) = self.state.selection() else {
                    return;
                };
                if let Some(source) = selection.source {
                    self.shape.fill(preview, source, background);
                }
                let clip = match self.shape {
                    SelectionShape::Rectangle => None,
                    SelectionShape::Ellipse => Some(Clip::Ellipse(selection.bounds)),
                };
                preview.draw_image(&selection.pixels, selection.bounds, 0.0, clip);
                self.outline(preview, selection.bounds);
                let handle_stroke = StrokeStyle::new(Color32::BLACK, 1.0);
                for anchor in Anchor::HANDLES {
                    let handle = Rect::from_center_size(anchor.point(selection.bounds), Vec2::splat(HANDLE_SIZE));
                    preview.fill_rect(handle, Color32::WHITE, CompositeMode::SourceOver);
                    preview.stroke_rect(handle, &handle_stroke);
                }
            }
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        match self.shape {
            SelectionShape::Rectangle => "Rectangle selection",
            SelectionShape::Ellipse => "Ellipse selection",
        }
    }

    fn deactivate(&mut self, ctx: &mut EditorContext) {
        if self.state.selection().is_some() {
            self.commit_selection(ctx);
        } else {
            self.cancel(ctx);
        }
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        match &self.state {
            SelectionState::Idle => {
                self.state = SelectionState::Selecting {
                    start: event.pos,
                    end: event.pos,
                };
            }
            SelectionState::Selected(selection) => {
                let selection = selection.clone();
                let origin = selection.bounds;
                if let Some(handle) = anchor_at(origin, event.pos) {
                    self.state = SelectionState::Resizing {
                        selection,
                        handle,
                        origin,
                    };
                } else if self.shape.contains(origin, event.pos) {
                    self.state = SelectionState::Moving {
                        selection,
                        grab: event.pos,
                        origin,
                    };
                } else {
                    self.commit_selection(ctx);
                }
            }
            _ => {}
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        let magnetism = ctx.magnetism;
        let spacing = ctx.grid_spacing();
        match &mut self.state {
            SelectionState::Selecting { end, .. } => *end = event.pos,
            SelectionState::Moving {
                selection,
                grab,
                origin,
            } => {
                let delta = if magnetism.enabled {
                    magnetism.dispatch(event.pos, *grab, &[origin.min, origin.max], spacing)
                } else {
                    event.pos - *grab
                };
                selection.bounds = origin.translate(delta);
            }
            SelectionState::Resizing {
                selection,
                handle,
                origin,
            } => {
                let target = if magnetism.enabled {
                    magnetism.snap_point(event.pos, spacing)
                } else {
                    event.pos
                };
                selection.bounds = resize_rect(*origin, *handle, target);
            }
            _ => return,
        }
        self.redraw(ctx);
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        match std::mem::replace(&mut self.state, SelectionState::Idle) {
            SelectionState::Selecting { start, .. } => {
                let rect = clamp_to_pixels(rect_from_points(start, event.pos), ctx.document.bounds());
                if rect.width() < 1.0 || rect.height() < 1.0 {
                    ctx.document.clear_preview();
                    return;
                }
                let mut pixels = ctx.document.base().get_image_data(rect);
                if self.shape == SelectionShape::Ellipse {
                    mask_to_ellipse(&mut pixels);
                }
                self.float(
                    Selection {
                        source: Some(rect),
                        bounds: rect,
                        pixels: Arc::new(pixels),
                    },
                    ctx,
                );
            }
            SelectionState::Moving { selection, origin, .. } => {
                if selection.bounds != origin {
                    Self::emit(ctx, SelectionEvent::Moved { bounds: selection.bounds });
                }
                self.state = SelectionState::Selected(selection);
                self.redraw(ctx);
            }
            SelectionState::Resizing { selection, origin, .. } => {
                if selection.bounds != origin {
                    Self::emit(ctx, SelectionEvent::Resized { bounds: selection.bounds });
                }
                self.state = SelectionState::Selected(selection);
                self.redraw(ctx);
            }
            other => self.state = other,
        }
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers, time: f64, ctx: &mut EditorContext) -> bool {
        match key {
            Key::Escape => match self.state {
                SelectionState::Idle => false,
                SelectionState::Selecting { .. } => {
                    self.cancel(ctx);
                    true
                }
                _ => {
                    self.commit_selection(ctx);
                    true
                }
            },
            Key::Delete | Key::Backspace => self.delete(ctx),
            Key::C if modifiers.command => self.copy(ctx),
            Key::X if modifiers.command => self.cut(ctx),
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                if !matches!(self.state, SelectionState::Selected(_)) {
                    return false;
                }
                if self.arrows.press(key, time) {
                    self.nudge(key, ctx);
                }
                true
            }
            _ => false,
        }
    }

    fn on_key_up(&mut self, key: Key, _ctx: &mut EditorContext) -> bool {
        let held = self.arrows.held_key() == Some(key);
        self.arrows.release(key);
        held
    }

    fn on_tick(&mut self, now: f64, ctx: &mut EditorContext) {
        if let Some(key) = self.arrows.poll(now) {
            self.nudge(key, ctx);
        }
    }

    fn wants_ticks(&self) -> bool {
        self.arrows.held_key().is_some() && self.state.selection().is_some()
    }

    /// Drops the selection without writing anything.
    fn cancel(&mut self, ctx: &mut EditorContext) {
        let had_selection = self.state.selection().is_some();
        if had_selection {
            ctx.cancel_gesture();
            Self::emit(ctx, SelectionEvent::Cleared);
        } else {
            ctx.document.clear_preview();
        }
        self.state = SelectionState::Idle;
        self.arrows.clear();
    }

    fn is_busy(&self) -> bool {
        self.state != SelectionState::Idle
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            SelectionState::Idle => "Idle",
            SelectionState::Selecting { .. } => "Selecting",
            SelectionState::Selected(_) => "Selected",
            SelectionState::Moving { .. } => "Moving",
            SelectionState::Resizing { .. } => "Resizing",
        }
    }
}
