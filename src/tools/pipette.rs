use super::Tool;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Picks the primary colour with a primary click and the secondary colour with a
/// secondary click. Clicks outside the canvas do nothing.
#[derive(Debug, Default)]
pub struct PipetteTool;

impl PipetteTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for PipetteTool {
    fn name(&self) -> &'static str {
        "Pipette"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() && !event.is_secondary() {
            return;
        }
        if let Some(color) = ctx.document.sample(event.pos) {
            ctx.set_color(color, event.is_primary());
        }
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
