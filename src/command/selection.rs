use std::sync::Arc;

use egui::{Color32, Rect};
use serde::{Deserialize, Serialize};

use crate::surface::{Clip, CompositeMode, ImageData, Surface};

/// Outline of a selection region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionShape {
    #[default]
    Rectangle,
    Ellipse,
}

impl SelectionShape {
    pub fn contains(self, rect: Rect, point: egui::Pos2) -> bool {
        match self {
            SelectionShape::Rectangle => crate::geometry::rect_contains(rect, point),
            SelectionShape::Ellipse => crate::geometry::ellipse_contains(rect, point),
        }
    }

    /// Paints the region with `color`, replacing what was there.
    pub fn fill(self, surface: &mut Surface, rect: Rect, color: Color32) {
        match self {
            SelectionShape::Rectangle => surface.fill_rect(rect, color, CompositeMode::Copy),
            SelectionShape::Ellipse => surface.fill_ellipse(rect, color, CompositeMode::Copy),
        }
    }
}

/// The committed result of a selection gesture.
///
/// `source` is the region the pixels were lifted from (absent for pastes) and is
/// painted with `background`. `pixels` are then drawn scaled into `destination`
/// (absent after a delete).
#[derive(Clone, PartialEq)]
pub struct SelectionCommand {
    shape: SelectionShape,
    source: Option<Rect>,
    pixels: Option<Arc<ImageData>>,
    destination: Option<Rect>,
    background: Color32,
}

impl std::fmt::Debug for SelectionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCommand")
            .field("shape", &self.shape)
            .field("source", &self.source)
            .field("pixels", &self.pixels.as_ref().map(|p| p.dimensions()))
            .field("destination", &self.destination)
            .field("background", &self.background)
            .finish()
    }
}

impl SelectionCommand {
    pub fn new(shape: SelectionShape, background: Color32) -> Self {
        Self {
            shape,
            source: None,
            pixels: None,
            destination: None,
            background,
        }
    }

    pub fn set_source(&mut self, source: Option<Rect>) {
        self.source = source;
    }

    pub fn set_pixels(&mut self, pixels: Option<Arc<ImageData>>) {
        self.pixels = pixels;
    }

    pub fn set_destination(&mut self, destination: Option<Rect>) {
        self.destination = destination;
    }

    pub fn shape(&self) -> SelectionShape {
        self.shape
    }

    pub fn source(&self) -> Option<Rect> {
        self.source
    }

    pub fn destination(&self) -> Option<Rect> {
        self.destination
    }

    pub fn pixels(&self) -> Option<&Arc<ImageData>> {
        self.pixels.as_ref()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// A selection that was neither moved, resized nor deleted changes nothing.
    pub fn is_noop(&self) -> bool {
        self.source.is_some() && self.source == self.destination
    }

    pub fn execute(&self, surface: &mut Surface) {
        if self.is_noop() {
            return;
        }
        if let Some(source) = self.source {
            self.shape.fill(surface, source, self.background);
        }
        if let (Some(pixels), Some(destination)) = (&self.pixels, self.destination) {
            let clip = match self.shape {
                SelectionShape::Rectangle => None,
                SelectionShape::Ellipse => Some(Clip::Ellipse(destination)),
            };
            surface.draw_image(pixels, destination, 0.0, clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::solid_image;
    use egui::pos2;

    #[test]
    fn test_move_erases_source_and_draws_destination() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.fill_rect(
            Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 2.0)),
            Color32::RED,
            CompositeMode::SourceOver,
        );

        let mut cmd = SelectionCommand::new(SelectionShape::Rectangle, Color32::WHITE);
        cmd.set_source(Some(Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 2.0))));
        cmd.set_pixels(Some(Arc::new(solid_image(2, 2, Color32::RED))));
        cmd.set_destination(Some(Rect::from_min_max(pos2(5.0, 5.0), pos2(7.0, 7.0))));
        cmd.execute(&mut surface);

        assert_eq!(surface.pixel(0, 0), Some(Color32::WHITE));
        assert_eq!(surface.pixel(5, 5), Some(Color32::RED));
        assert_eq!(surface.pixel(6, 6), Some(Color32::RED));
    }

    #[test]
    fn test_unchanged_selection_is_noop() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 2.0));
        let mut cmd = SelectionCommand::new(SelectionShape::Rectangle, Color32::WHITE);
        cmd.set_source(Some(rect));
        cmd.set_destination(Some(rect));
        assert!(cmd.is_noop());

        let mut surface = Surface::new(4, 4).unwrap();
        let revision = surface.revision();
        cmd.execute(&mut surface);
        assert_eq!(surface.revision(), revision);
    }
}
