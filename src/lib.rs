#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod magnetism;
pub mod panels;
pub mod persistence;
pub mod state;
pub mod style;
pub mod surface;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use command::{Command, UndoRedoManager};
pub use config::EditorSettings;
pub use document::Document;
pub use input::{InputEvent, InputRouter, PointerEvent};
pub use state::EditorContext;
pub use surface::{ImageData, Surface};
pub use tools::{Tool, ToolKind};
