//! Services shared by the tools, passed to them explicitly on every call.
//!
//! A tool never owns pixels or history. It reads the current [`Style`], draws its
//! in-progress gesture on the document's preview surface and, once the gesture is
//! complete, hands a [`Command`] to [`EditorContext::commit`], which draws it on the
//! base surface and records it.
//!
//! # Gestures
//!
//! - [`begin_gesture`](EditorContext::begin_gesture) mutes the history
//! - [`commit`](EditorContext::commit) re-enables it right before pushing
//! - [`cancel_gesture`](EditorContext::cancel_gesture) re-enables it and drops the preview

use egui::Color32;

use crate::clipboard::Clipboard;
use crate::command::{Command, UndoRedoManager};
use crate::config::EditorSettings;
use crate::document::Document;
use crate::error::SurfaceError;
use crate::event::{DocumentEvent, EditorEvent, EventBus};
use crate::grid::Grid;
use crate::magnetism::Magnetism;
use crate::surface::ImageData;
use crate::style::Style;

#[derive(Debug)]
pub struct EditorContext {
    pub document: Document,
    pub history: UndoRedoManager,
    pub style: Style,
    pub clipboard: Clipboard,
    pub magnetism: Magnetism,
    pub grid: Grid,
    pub settings: EditorSettings,
    pub event_bus: EventBus,
}

impl EditorContext {
    /// Creates a blank drawing sized and styled from `settings`.
    pub fn new(settings: EditorSettings) -> Result<Self, SurfaceError> {
        let document = Document::new(
            settings.canvas_width,
            settings.canvas_height,
            settings.background_color,
        )?;
        let history = UndoRedoManager::new(document.width(), document.height())
            .with_max_history(settings.max_history);
        let mut grid = Grid::new(settings.grid_size, settings.grid_opacity);
        grid.visible = settings.show_grid;
        let mut context = Self {
            document,
            history,
            style: settings.style,
            clipboard: Clipboard::default(),
            magnetism: Magnetism {
                enabled: settings.magnetism,
                anchor: None,
            },
            grid,
            settings,
            event_bus: EventBus::new(),
        };
        context.refresh_grid();
        Ok(context)
    }

    pub fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }

    /// Mutes the history for the duration of a gesture.
    pub fn begin_gesture(&mut self) {
        self.history.disable();
    }

    /// Drops the preview and unmutes the history without recording anything.
    pub fn cancel_gesture(&mut self) {
        self.document.clear_preview();
        self.history.enable();
    }

    /// Draws `command` on the base surface and records it.
    pub fn commit(&mut self, command: impl Into<Command>) {
        let command = command.into();
        self.document.clear_preview();
        command.execute(self.document.base_mut());

        self.history.enable();
        self.history.clear_redo_stack();
        let name = command.name();
        if self.history.push(command) {
            self.emit(EditorEvent::CommandCommitted { name });
            self.emit_history_changed();
        }
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(self.document.base_mut());
        if undone {
            self.emit_history_changed();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(self.document.base_mut());
        if redone {
            self.emit_history_changed();
        }
        redone
    }

    fn emit_history_changed(&self) {
        self.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    /// Replaces the drawing with a blank one and forgets the history.
    pub fn new_drawing(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.document = Document::new(width, height, self.settings.background_color)?;
        self.history.clear(width, height);
        self.refresh_grid();
        log::info!("New {width}x{height} drawing");
        self.emit(EditorEvent::DocumentChanged(DocumentEvent::Created { width, height }));
        self.emit_history_changed();
        Ok(())
    }

    /// Replaces the drawing with `image`. Undo never goes past the opened pixels.
    pub fn open_drawing(&mut self, image: &ImageData) -> Result<(), SurfaceError> {
        self.document = Document::from_image(image, self.settings.background_color)?;
        self.history.reset_to(self.document.base().clone());
        self.refresh_grid();
        self.emit_history_changed();
        Ok(())
    }

    /// Redraws the grid overlay after a size or visibility change.
    pub fn refresh_grid(&mut self) {
        self.grid.draw(self.document.grid_mut());
    }

    /// Step used by magnetism, the grid spacing in pixels.
    pub fn grid_spacing(&self) -> f32 {
        self.grid.spacing()
    }

    pub fn set_color(&mut self, color: Color32, primary: bool) {
        if primary {
            self.style.primary_color = color;
        } else {
            self.style.secondary_color = color;
        }
        self.emit(EditorEvent::ColorPicked { color, primary });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RectangleCommand;
    use crate::event::EventRecorder;
    use crate::style::TraceType;
    use egui::pos2;

    fn small_context() -> EditorContext {
        EditorContext::new(EditorSettings {
            canvas_width: 8,
            canvas_height: 8,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_commit_reenables_history_and_records() {
        let mut ctx = small_context();
        let recorder = EventRecorder::new();
        ctx.event_bus.subscribe(Box::new(recorder.clone()));

        ctx.begin_gesture();
        assert!(!ctx.history.is_enabled());
        let style = Style::new(Color32::RED, 1.0).with_trace(TraceType::Filled);
        ctx.commit(RectangleCommand::new(style).with_corners(pos2(0.0, 0.0), pos2(2.0, 2.0)));

        assert!(ctx.history.is_enabled());
        assert_eq!(ctx.history.undo_len(), 1);
        assert_eq!(ctx.document.base().pixel(1, 1), Some(Color32::RED));
        assert!(recorder.events().contains(&EditorEvent::CommandCommitted { name: "Rectangle" }));
    }

    #[test]
    fn test_cancel_leaves_history_untouched() {
        let mut ctx = small_context();
        ctx.begin_gesture();
        ctx.cancel_gesture();
        assert!(ctx.history.is_enabled());
        assert!(!ctx.history.can_undo());
    }

    #[test]
    fn test_open_drawing_sets_undo_floor() {
        let mut ctx = small_context();
        let image = crate::surface::solid_image(4, 4, Color32::BLUE);
        ctx.open_drawing(&image).unwrap();
        assert_eq!(ctx.document.width(), 4);

        let style = Style::new(Color32::RED, 1.0).with_trace(TraceType::Filled);
        ctx.commit(RectangleCommand::new(style).with_corners(pos2(0.0, 0.0), pos2(1.0, 1.0)));
        assert!(ctx.undo());
        assert_eq!(ctx.document.base().pixel(0, 0), Some(Color32::BLUE));
        assert!(!ctx.undo());
    }
}
