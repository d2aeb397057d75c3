use egui::{Key, Modifiers};

use super::InputEvent;
use crate::command::SelectionShape;
use crate::event::EditorEvent;
use crate::state::EditorContext;
use crate::tools::{Tool, ToolKind, ToolType};

/// Work the router cannot do itself and hands back to the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    Save,
    NewDrawing,
    OpenGallery,
}

/// Owns the active tool and routes input events to it.
///
/// Key presses go to the tool first; only keys the tool leaves unhandled reach the
/// global shortcuts (undo, redo, tool hotkeys, grid and magnetism toggles).
#[derive(Debug)]
pub struct InputRouter {
    tool: ToolType,
}

impl InputRouter {
    pub fn new(kind: ToolKind, ctx: &mut EditorContext) -> Self {
        let mut tool = ToolType::new(kind, &ctx.settings);
        tool.activate(ctx);
        Self { tool }
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolType {
        &mut self.tool
    }

    pub fn active_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Deactivates the current tool (cancelling or committing its gesture) and
    /// activates a fresh `kind`. Selecting the active tool again does nothing.
    pub fn set_tool(&mut self, kind: ToolKind, ctx: &mut EditorContext) {
        let old = self.tool.kind();
        if old == kind {
            return;
        }
        self.tool.deactivate(ctx);
        self.tool = ToolType::new(kind, &ctx.settings);
        self.tool.activate(ctx);
        log::debug!("Tool changed from {} to {}", old.label(), kind.label());
        ctx.emit(EditorEvent::ToolChanged { old, new: kind });
    }

    /// Whether the active tool needs [`tick`](Self::tick) calls.
    pub fn wants_ticks(&self) -> bool {
        self.tool.wants_ticks()
    }

    pub fn tick(&mut self, now: f64, ctx: &mut EditorContext) {
        if self.tool.wants_ticks() {
            self.tool.on_tick(now, ctx);
        }
    }

    pub fn handle(&mut self, event: &InputEvent, ctx: &mut EditorContext) -> Option<ShellRequest> {
        match event {
            InputEvent::PointerDown(e) => self.tool.on_pointer_down(e, ctx),
            InputEvent::PointerMove(e) => self.tool.on_pointer_move(e, ctx),
            InputEvent::PointerUp(e) => self.tool.on_pointer_up(e, ctx),
            InputEvent::Wheel { delta, modifiers, .. } => self.tool.on_wheel(*delta, *modifiers, ctx),
            InputEvent::ModifiersChanged { modifiers, .. } => self.tool.on_modifiers_changed(*modifiers, ctx),
            InputEvent::KeyUp { key, modifiers, .. } => {
                self.tool.on_key_up(*key, ctx);
                self.tool.on_modifiers_changed(*modifiers, ctx);
            }
            InputEvent::KeyDown {
                key,
                modifiers,
                repeat,
                time,
            } => {
                if self.tool.on_key_down(*key, *modifiers, *time, ctx) || *repeat {
                    return None;
                }
                return self.shortcut(*key, *modifiers, ctx);
            }
        }
        None
    }

    fn shortcut(&mut self, key: Key, modifiers: Modifiers, ctx: &mut EditorContext) -> Option<ShellRequest> {
        if modifiers.command {
            match key {
                Key::Z if modifiers.shift => self.redo(ctx),
                Key::Z => self.undo(ctx),
                Key::Y => self.redo(ctx),
                Key::A => {
                    self.set_tool(ToolKind::RectangleSelection, ctx);
                    if let Some(selection) = self.tool.as_selection_tool_mut() {
                        selection.select_all(ctx);
                    }
                }
                Key::V => {
                    if !ctx.clipboard.already_copied() {
                        log::debug!("Nothing copied yet");
                        return None;
                    }
                    if !self.active_kind().is_selection() {
                        // Paste with the selection tool the pixels were copied with.
                        let kind = match ctx.clipboard.content().map(|content| content.shape) {
                            Some(SelectionShape::Ellipse) => ToolKind::EllipseSelection,
                            _ => ToolKind::RectangleSelection,
                        };
                        self.set_tool(kind, ctx);
                    }
                    if let Some(selection) = self.tool.as_selection_tool_mut() {
                        selection.paste(ctx);
                    }
                }
                Key::S => return Some(ShellRequest::Save),
                Key::N => return Some(ShellRequest::NewDrawing),
                Key::O | Key::G => return Some(ShellRequest::OpenGallery),
                _ => {}
            }
            return None;
        }

        match key {
            Key::Escape => self.tool.cancel(ctx),
            Key::G => {
                ctx.grid.toggle();
                ctx.refresh_grid();
            }
            Key::M => ctx.magnetism.toggle(),
            Key::Plus | Key::Equals => {
                ctx.grid.increase();
                ctx.refresh_grid();
            }
            Key::Minus => {
                ctx.grid.decrease();
                ctx.refresh_grid();
            }
            _ => {
                if let Some(kind) = ToolKind::from_shortcut(key) {
                    self.set_tool(kind, ctx);
                }
            }
        }
        None
    }

    /// Undo abandons the gesture in progress first.
    pub fn undo(&mut self, ctx: &mut EditorContext) {
        self.tool.cancel(ctx);
        if !ctx.undo() {
            log::debug!("Nothing to undo");
        }
    }

    pub fn redo(&mut self, ctx: &mut EditorContext) {
        self.tool.cancel(ctx);
        if !ctx.redo() {
            log::debug!("Nothing to redo");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorSettings;
    use crate::event::EventRecorder;
    use crate::surface::ImageData;
    use std::sync::Arc;

    fn context() -> EditorContext {
        EditorContext::new(EditorSettings {
            canvas_width: 20,
            canvas_height: 20,
            ..Default::default()
        })
        .unwrap()
    }

    fn key(key: Key, modifiers: Modifiers) -> InputEvent {
        InputEvent::KeyDown {
            key,
            modifiers,
            repeat: false,
            time: 0.0,
        }
    }

    #[test]
    fn test_hotkey_switches_tool_and_emits() {
        let mut ctx = context();
        let recorder = EventRecorder::new();
        ctx.event_bus.subscribe(Box::new(recorder.clone()));
        let mut router = InputRouter::new(ToolKind::Pencil, &mut ctx);

        router.handle(&key(Key::E, Modifiers::NONE), &mut ctx);
        assert_eq!(router.active_kind(), ToolKind::Eraser);
        assert_eq!(
            recorder.events(),
            vec![EditorEvent::ToolChanged {
                old: ToolKind::Pencil,
                new: ToolKind::Eraser
            }]
        );
    }

    #[test]
    fn test_shell_requests() {
        let mut ctx = context();
        let mut router = InputRouter::new(ToolKind::Pencil, &mut ctx);
        assert_eq!(router.handle(&key(Key::S, Modifiers::COMMAND), &mut ctx), Some(ShellRequest::Save));
        assert_eq!(router.handle(&key(Key::O, Modifiers::COMMAND), &mut ctx), Some(ShellRequest::OpenGallery));
        // Plain S selects the ellipse selection tool instead.
        assert_eq!(router.handle(&key(Key::S, Modifiers::NONE), &mut ctx), None);
        assert_eq!(router.active_kind(), ToolKind::EllipseSelection);
    }

    #[test]
    fn test_grid_and_magnetism_toggles() {
        let mut ctx = context();
        let mut router = InputRouter::new(ToolKind::Pencil, &mut ctx);
        let visible = ctx.grid.visible;
        router.handle(&key(Key::G, Modifiers::NONE), &mut ctx);
        assert_eq!(ctx.grid.visible, !visible);
        router.handle(&key(Key::M, Modifiers::NONE), &mut ctx);
        assert!(ctx.magnetism.enabled);
    }

    #[test]
    fn test_select_all_switches_to_rectangle_selection() {
        let mut ctx = context();
        let mut router = InputRouter::new(ToolKind::Line, &mut ctx);
        router.handle(&key(Key::A, Modifiers::COMMAND), &mut ctx);
        assert_eq!(router.active_kind(), ToolKind::RectangleSelection);
        let selection = router.tool().as_selection_tool().and_then(|t| t.selection()).unwrap();
        assert_eq!(selection.bounds, ctx.document.bounds());
    }

    #[test]
    fn test_paste_picks_the_copied_shape() {
        let mut ctx = context();
        let mut router = InputRouter::new(ToolKind::Pencil, &mut ctx);
        router.handle(&key(Key::V, Modifiers::COMMAND), &mut ctx);
        assert_eq!(router.active_kind(), ToolKind::Pencil);

        ctx.clipboard.copy(Arc::new(ImageData::new(4, 4)), SelectionShape::Ellipse);
        router.handle(&key(Key::V, Modifiers::COMMAND), &mut ctx);
        assert_eq!(router.active_kind(), ToolKind::EllipseSelection);
        let selection = router.tool().as_selection_tool().and_then(|t| t.selection()).unwrap();
        assert_eq!(selection.bounds.size(), egui::vec2(4.0, 4.0));
    }
}
