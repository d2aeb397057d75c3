use std::sync::Arc;

use egui::{Pos2, Vec2};

use crate::command::SelectionShape;
use crate::surface::ImageData;

/// Offset between successive pastes of the same clipboard content.
pub const PASTE_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardContent {
    pub pixels: Arc<ImageData>,
    pub shape: SelectionShape,
}

/// Single-slot image clipboard shared by the selection tools.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    content: Option<ClipboardContent>,
    already_copied: bool,
    paste_count: u32,
}

impl Clipboard {
    /// Replaces the clipboard content and restarts the paste cascade.
    pub fn copy(&mut self, pixels: Arc<ImageData>, shape: SelectionShape) {
        log::debug!("Copied {}x{} pixels to the clipboard", pixels.width(), pixels.height());
        self.content = Some(ClipboardContent { pixels, shape });
        self.already_copied = true;
        self.paste_count = 0;
    }

    pub fn content(&self) -> Option<&ClipboardContent> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Whether anything was copied since the editor started.
    pub fn already_copied(&self) -> bool {
        self.already_copied
    }

    /// Content to paste and where its top-left corner goes. Each call moves the
    /// position one step further from `origin`. The content itself stays.
    pub fn paste(&mut self, origin: Pos2) -> Option<(ClipboardContent, Pos2)> {
        let content = self.content.clone()?;
        let position = origin + Vec2::splat(PASTE_OFFSET * self.paste_count as f32);
        self.paste_count += 1;
        Some((content, position))
    }

    pub fn clear(&mut self) {
        self.content = None;
        self.paste_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_paste_cascades_and_keeps_content() {
        let mut clipboard = Clipboard::default();
        assert!(clipboard.paste(Pos2::ZERO).is_none());

        clipboard.copy(Arc::new(ImageData::new(2, 2)), SelectionShape::Ellipse);
        let (first, at) = clipboard.paste(Pos2::ZERO).unwrap();
        assert_eq!(at, pos2(0.0, 0.0));
        assert_eq!(first.shape, SelectionShape::Ellipse);
        let (_, at) = clipboard.paste(Pos2::ZERO).unwrap();
        assert_eq!(at, pos2(PASTE_OFFSET, PASTE_OFFSET));
        assert!(!clipboard.is_empty());

        clipboard.copy(Arc::new(ImageData::new(1, 1)), SelectionShape::Rectangle);
        let (_, at) = clipboard.paste(Pos2::ZERO).unwrap();
        assert_eq!(at, Pos2::ZERO);
    }
}
