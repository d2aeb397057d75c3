use egui::{Color32, Rect};
use uuid::Uuid;

use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    /// A command was drawn on the base surface and recorded
    CommandCommitted {
        name: &'static str,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    ColorPicked {
        color: Color32,
        primary: bool,
    },
    SelectionChanged(SelectionEvent),
    ClipboardChanged,
    DocumentChanged(DocumentEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Created { bounds: Rect },
    Moved { bounds: Rect },
    Resized { bounds: Rect },
    Deleted,
    Committed,
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    Created { width: u32, height: u32 },
    Opened { id: Uuid },
    Saved { id: Uuid },
    SaveFailed { message: String },
    Deleted { id: Uuid },
    DeleteFailed { message: String },
}
