//! Drawing commands and the undo/redo history that replays them.

mod airbrush;
mod commands;
mod eraser;
mod history;
mod line;
mod paint_bucket;
mod selection;
mod shapes;
mod stamp;

pub use airbrush::{AirbrushCommand, spray};
pub use commands::Command;
pub use eraser::EraserCommand;
pub use history::{DEFAULT_MAX_HISTORY, UndoRedoManager};
pub use line::LineCommand;
pub use paint_bucket::{PaintBucketCommand, colors_match, flood_fill};
pub use selection::{SelectionCommand, SelectionShape};
pub use shapes::{EllipseCommand, PolygonCommand, RectangleCommand};
pub use stamp::StampCommand;
