use super::{
    AirbrushCommand, EllipseCommand, EraserCommand, LineCommand, PaintBucketCommand,
    PolygonCommand, RectangleCommand, SelectionCommand, StampCommand,
};
use crate::surface::Surface;

/// Commands recorded by the editor, one per completed drawing action.
///
/// Every variant holds everything it needs to redraw itself; replaying the same
/// commands from the same starting surface always produces the same pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Polyline from the line tool or a freehand pencil path
    Line(LineCommand),
    Rectangle(RectangleCommand),
    Ellipse(EllipseCommand),
    Polygon(PolygonCommand),
    Eraser(EraserCommand),
    Airbrush(AirbrushCommand),
    Stamp(StampCommand),
    PaintBucket(PaintBucketCommand),
    /// Move, resize, delete or paste of a selected region
    Selection(SelectionCommand),
}

impl Command {
    /// Draws the command onto `surface`.
    pub fn execute(&self, surface: &mut Surface) {
        match self {
            Command::Line(cmd) => cmd.execute(surface),
            Command::Rectangle(cmd) => cmd.execute(surface),
            Command::Ellipse(cmd) => cmd.execute(surface),
            Command::Polygon(cmd) => cmd.execute(surface),
            Command::Eraser(cmd) => cmd.execute(surface),
            Command::Airbrush(cmd) => cmd.execute(surface),
            Command::Stamp(cmd) => cmd.execute(surface),
            Command::PaintBucket(cmd) => cmd.execute(surface),
            Command::Selection(cmd) => cmd.execute(surface),
        }
    }

    /// Short human readable name, used by the history list and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Line(_) => "Line",
            Command::Rectangle(_) => "Rectangle",
            Command::Ellipse(_) => "Ellipse",
            Command::Polygon(_) => "Polygon",
            Command::Eraser(_) => "Eraser",
            Command::Airbrush(_) => "Airbrush",
            Command::Stamp(_) => "Stamp",
            Command::PaintBucket(_) => "Paint bucket",
            Command::Selection(_) => "Selection",
        }
    }
}

impl From<LineCommand> for Command {
    fn from(cmd: LineCommand) -> Self {
        Command::Line(cmd)
    }
}

impl From<RectangleCommand> for Command {
    fn from(cmd: RectangleCommand) -> Self {
        Command::Rectangle(cmd)
    }
}

impl From<EllipseCommand> for Command {
    fn from(cmd: EllipseCommand) -> Self {
        Command::Ellipse(cmd)
    }
}

impl From<PolygonCommand> for Command {
    fn from(cmd: PolygonCommand) -> Self {
        Command::Polygon(cmd)
    }
}

impl From<EraserCommand> for Command {
    fn from(cmd: EraserCommand) -> Self {
        Command::Eraser(cmd)
    }
}

impl From<AirbrushCommand> for Command {
    fn from(cmd: AirbrushCommand) -> Self {
        Command::Airbrush(cmd)
    }
}

impl From<StampCommand> for Command {
    fn from(cmd: StampCommand) -> Self {
        Command::Stamp(cmd)
    }
}

impl From<PaintBucketCommand> for Command {
    fn from(cmd: PaintBucketCommand) -> Self {
        Command::PaintBucket(cmd)
    }
}

impl From<SelectionCommand> for Command {
    fn from(cmd: SelectionCommand) -> Self {
        Command::Selection(cmd)
    }
}
