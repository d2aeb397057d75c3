use super::Tool;
use crate::command::{PaintBucketCommand, flood_fill};
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Primary click fills the contiguous region around the pointer; secondary click
/// fills every pixel of the clicked colour.
#[derive(Debug, Default)]
pub struct PaintBucketTool;

impl PaintBucketTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for PaintBucketTool {
    fn name(&self) -> &'static str {
        "Paint bucket"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        let contiguous = match event.button {
            egui::PointerButton::Primary => true,
            egui::PointerButton::Secondary => false,
            _ => return,
        };
        let source = ctx.document.flatten();
        let Some(fill) = flood_fill(
            &source,
            event.pos,
            ctx.style.primary_color,
            ctx.settings.bucket_tolerance,
            contiguous,
        ) else {
            return;
        };
        ctx.begin_gesture();
        ctx.commit(PaintBucketCommand::new(event.pos, fill));
    }

    fn on_pointer_move(&mut self, _event: &PointerEvent, _ctx: &mut EditorContext) {}

    fn on_pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut EditorContext) {}

    fn cancel(&mut self, _ctx: &mut EditorContext) {}

    fn is_busy(&self) -> bool {
        false
    }

    fn state_name(&self) -> &'static str {
        "Idle"
    }
}
