mod central_panel;
mod gallery;
mod tools_panel;

pub use central_panel::{CanvasTextures, central_panel};
pub use gallery::{GalleryMode, GalleryWindow, gallery_window};
pub use tools_panel::tools_panel;
