use egui::{Key, Modifiers, Pos2, Vec2};

use crate::command::{Command, SelectionShape};
use crate::config::EditorSettings;
use crate::input::PointerEvent;
use crate::state::EditorContext;

mod airbrush;
mod anchored;
mod eraser;
mod line;
mod paint_bucket;
mod pencil;
mod pipette;
mod polygon;
mod selection;
mod shape;
mod stamp;

pub use airbrush::{AirbrushState, AirbrushTool};
pub use eraser::{EraserState, EraserTool};
pub use line::LineTool;
pub use paint_bucket::PaintBucketTool;
pub use pencil::{PencilState, PencilTool};
pub use pipette::PipetteTool;
pub use polygon::PolygonTool;
pub use selection::{ARROW_STEP, Selection, SelectionState, SelectionTool};
pub use shape::{ShapeKind, ShapeState, ShapeTool};
pub use stamp::{StampTool, builtin_stamps, load_stamp, load_stamp_bytes};

/// Distance from the first vertex within which a click closes a polyline or polygon.
pub const CLOSE_DISTANCE: f32 = 20.0;

/// Tool trait defines the interface for all drawing tools.
///
/// Tools keep only their transient gesture state. Everything else, including the
/// pixels, the history and the current style, comes from the [`EditorContext`].
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Called when the tool becomes active. Tools start idle.
    fn activate(&mut self, _ctx: &mut EditorContext) {}

    /// Called when another tool is selected. Unfinished gestures are cancelled.
    fn deactivate(&mut self, ctx: &mut EditorContext) {
        self.cancel(ctx);
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext);

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext);

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext);

    fn on_double_click(&mut self, _pos: Pos2, _ctx: &mut EditorContext) {}

    fn on_wheel(&mut self, _delta: Vec2, _modifiers: Modifiers, _ctx: &mut EditorContext) {}

    /// Returns `true` when the tool handled the key, which stops global shortcuts.
    fn on_key_down(&mut self, _key: Key, _modifiers: Modifiers, _time: f64, _ctx: &mut EditorContext) -> bool {
        false
    }

    fn on_key_up(&mut self, _key: Key, _ctx: &mut EditorContext) -> bool {
        false
    }

    fn on_modifiers_changed(&mut self, _modifiers: Modifiers, _ctx: &mut EditorContext) {}

    /// Time-driven work: confirming clicks, spraying, key repeat.
    fn on_tick(&mut self, _now: f64, _ctx: &mut EditorContext) {}

    /// Whether the tool needs [`on_tick`](Self::on_tick) calls right now.
    fn wants_ticks(&self) -> bool {
        false
    }

    /// Abandons any gesture in progress without recording it.
    fn cancel(&mut self, ctx: &mut EditorContext);

    /// Whether a gesture is in progress.
    fn is_busy(&self) -> bool;

    fn state_name(&self) -> &'static str;
}

/// Every tool the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pencil,
    Line,
    Rectangle,
    Ellipse,
    Polygon,
    RectangleSelection,
    EllipseSelection,
    Stamp,
    Airbrush,
    Eraser,
    PaintBucket,
    Pipette,
}

impl ToolKind {
    pub const ALL: [ToolKind; 12] = [
        ToolKind::Pencil,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Polygon,
        ToolKind::RectangleSelection,
        ToolKind::EllipseSelection,
        ToolKind::Stamp,
        ToolKind::Airbrush,
        ToolKind::Eraser,
        ToolKind::PaintBucket,
        ToolKind::Pipette,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Polygon => "Polygon",
            ToolKind::RectangleSelection => "Rectangle selection",
            ToolKind::EllipseSelection => "Ellipse selection",
            ToolKind::Stamp => "Stamp",
            ToolKind::Airbrush => "Airbrush",
            ToolKind::Eraser => "Eraser",
            ToolKind::PaintBucket => "Paint bucket",
            ToolKind::Pipette => "Pipette",
        }
    }

    /// Key that selects the tool (without modifiers).
    pub fn shortcut(self) -> Key {
        match self {
            ToolKind::Pencil => Key::C,
            ToolKind::Line => Key::L,
            ToolKind::Rectangle => Key::Num1,
            ToolKind::Ellipse => Key::Num2,
            ToolKind::Polygon => Key::Num3,
            ToolKind::RectangleSelection => Key::R,
            ToolKind::EllipseSelection => Key::S,
            ToolKind::Stamp => Key::D,
            ToolKind::Airbrush => Key::A,
            ToolKind::Eraser => Key::E,
            ToolKind::PaintBucket => Key::B,
            ToolKind::Pipette => Key::I,
        }
    }

    pub fn from_shortcut(key: Key) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|kind| kind.shortcut() == key)
    }

    pub fn is_selection(self) -> bool {
        matches!(self, ToolKind::RectangleSelection | ToolKind::EllipseSelection)
    }
}

/// All tools as one enum, so the router owns its active tool without boxing.
pub enum ToolType {
    Pencil(PencilTool),
    Line(LineTool),
    Shape(ShapeTool),
    Polygon(PolygonTool),
    Selection(SelectionTool),
    Stamp(StampTool),
    Airbrush(AirbrushTool),
    Eraser(EraserTool),
    PaintBucket(PaintBucketTool),
    Pipette(PipetteTool),
}

impl std::fmt::Debug for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolType")
            .field("kind", &self.kind())
            .field("state", &self.state_name())
            .finish()
    }
}

macro_rules! dispatch {
    ($self:expr, $tool:ident => $body:expr) => {
        match $self {
            ToolType::Pencil($tool) => $body,
            ToolType::Line($tool) => $body,
            ToolType::Shape($tool) => $body,
            ToolType::Polygon($tool) => $body,
            ToolType::Selection($tool) => $body,
            ToolType::Stamp($tool) => $body,
            ToolType::Airbrush($tool) => $body,
            ToolType::Eraser($tool) => $body,
            ToolType::PaintBucket($tool) => $body,
            ToolType::Pipette($tool) => $body,
        }
    };
}

impl ToolType {
    pub fn new(kind: ToolKind, settings: &EditorSettings) -> Self {
        match kind {
            ToolKind::Pencil => ToolType::Pencil(PencilTool::new()),
            ToolKind::Line => ToolType::Line(LineTool::new()),
            ToolKind::Rectangle => ToolType::Shape(ShapeTool::new(ShapeKind::Rectangle)),
            ToolKind::Ellipse => ToolType::Shape(ShapeTool::new(ShapeKind::Ellipse)),
            ToolKind::Polygon => ToolType::Polygon(PolygonTool::new()),
            ToolKind::RectangleSelection => ToolType::Selection(SelectionTool::new(SelectionShape::Rectangle)),
            ToolKind::EllipseSelection => ToolType::Selection(SelectionTool::new(SelectionShape::Ellipse)),
            ToolKind::Stamp => ToolType::Stamp(StampTool::new(settings.stamp_scale)),
            ToolKind::Airbrush => ToolType::Airbrush(AirbrushTool::new(crate::util::time::clock_seed())),
            ToolKind::Eraser => ToolType::Eraser(EraserTool::new()),
            ToolKind::PaintBucket => ToolType::PaintBucket(PaintBucketTool::new()),
            ToolKind::Pipette => ToolType::Pipette(PipetteTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolType::Pencil(_) => ToolKind::Pencil,
            ToolType::Line(_) => ToolKind::Line,
            ToolType::Shape(tool) => match tool.shape() {
                ShapeKind::Rectangle => ToolKind::Rectangle,
                ShapeKind::Ellipse => ToolKind::Ellipse,
            },
            ToolType::Polygon(_) => ToolKind::Polygon,
            ToolType::Selection(tool) => match tool.shape() {
                SelectionShape::Rectangle => ToolKind::RectangleSelection,
                SelectionShape::Ellipse => ToolKind::EllipseSelection,
            },
            ToolType::Stamp(_) => ToolKind::Stamp,
            ToolType::Airbrush(_) => ToolKind::Airbrush,
            ToolType::Eraser(_) => ToolKind::Eraser,
            ToolType::PaintBucket(_) => ToolKind::PaintBucket,
            ToolType::Pipette(_) => ToolKind::Pipette,
        }
    }

    pub fn as_selection_tool(&self) -> Option<&SelectionTool> {
        match self {
            ToolType::Selection(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_selection_tool_mut(&mut self) -> Option<&mut SelectionTool> {
        match self {
            ToolType::Selection(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_stamp_tool_mut(&mut self) -> Option<&mut StampTool> {
        match self {
            ToolType::Stamp(tool) => Some(tool),
            _ => None,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        dispatch!(self, tool => tool.name())
    }

    fn activate(&mut self, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.activate(ctx))
    }

    fn deactivate(&mut self, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.deactivate(ctx))
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_pointer_down(event, ctx))
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_pointer_move(event, ctx))
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_pointer_up(event, ctx))
    }

    fn on_double_click(&mut self, pos: Pos2, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_double_click(pos, ctx))
    }

    fn on_wheel(&mut self, delta: Vec2, modifiers: Modifiers, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_wheel(delta, modifiers, ctx))
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers, time: f64, ctx: &mut EditorContext) -> bool {
        dispatch!(self, tool => tool.on_key_down(key, modifiers, time, ctx))
    }

    fn on_key_up(&mut self, key: Key, ctx: &mut EditorContext) -> bool {
        dispatch!(self, tool => tool.on_key_up(key, ctx))
    }

    fn on_modifiers_changed(&mut self, modifiers: Modifiers, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_modifiers_changed(modifiers, ctx))
    }

    fn on_tick(&mut self, now: f64, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.on_tick(now, ctx))
    }

    fn wants_ticks(&self) -> bool {
        dispatch!(self, tool => tool.wants_ticks())
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        dispatch!(self, tool => tool.cancel(ctx))
    }

    fn is_busy(&self) -> bool {
        dispatch!(self, tool => tool.is_busy())
    }

    fn state_name(&self) -> &'static str {
        dispatch!(self, tool => tool.state_name())
    }
}

/// Clears the preview surface and draws `command` on it.
pub(crate) fn draw_preview(ctx: &mut EditorContext, command: impl Into<Command>) {
    let preview = ctx.document.preview_mut();
    preview.clear();
    command.into().execute(preview);
}
