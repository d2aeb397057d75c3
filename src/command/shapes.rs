use egui::{Pos2, Rect};

use crate::style::Style;
use crate::surface::{Cap, CompositeMode, StrokeStyle, Surface};

/// Inset applied to an outline so the stroke stays inside the dragged box. Returns
/// `None` when the box is too small to hold the stroke, in which case the whole box
/// is painted with the outline colour.
fn outline_rect(rect: Rect, width: f32) -> Option<Rect> {
    let inset = rect.shrink(width / 2.0);
    (inset.width() > 0.0 && inset.height() > 0.0).then_some(inset)
}

/// An axis-aligned rectangle spanned by two corner points.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleCommand {
    style: Style,
    start: Pos2,
    end: Pos2,
}

impl RectangleCommand {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            start: Pos2::ZERO,
            end: Pos2::ZERO,
        }
    }

    pub fn set_start(&mut self, start: Pos2) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Pos2) {
        self.end = end;
    }

    pub fn with_corners(mut self, start: Pos2, end: Pos2) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    pub fn execute(&self, surface: &mut Surface) {
        let rect = self.bounds();
        if let Some(fill) = self.style.fill_color() {
            surface.fill_rect(rect, fill, CompositeMode::SourceOver);
        }
        if let Some(color) = self.style.outline_color() {
            match outline_rect(rect, self.style.line_width) {
                Some(inset) => {
                    let stroke = StrokeStyle::new(color, self.style.line_width).with_cap(Cap::Square);
                    surface.stroke_rect(inset, &stroke);
                }
                None => surface.fill_rect(rect, color, CompositeMode::SourceOver),
            }
        }
    }
}

/// The ellipse inscribed in the box spanned by two corner points.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCommand {
    style: Style,
    start: Pos2,
    end: Pos2,
}

impl EllipseCommand {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            start: Pos2::ZERO,
            end: Pos2::ZERO,
        }
    }

    pub fn set_start(&mut self, start: Pos2) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Pos2) {
        self.end = end;
    }

    pub fn with_corners(mut self, start: Pos2, end: Pos2) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    pub fn execute(&self, surface: &mut Surface) {
        let rect = self.bounds();
        if let Some(fill) = self.style.fill_color() {
            surface.fill_ellipse(rect, fill, CompositeMode::SourceOver);
        }
        if let Some(color) = self.style.outline_color() {
            match outline_rect(rect, self.style.line_width) {
                Some(inset) => {
                    let stroke = StrokeStyle::new(color, self.style.line_width);
                    surface.stroke_ellipse(inset, &stroke);
                }
                None => surface.fill_ellipse(rect, color, CompositeMode::SourceOver),
            }
        }
    }
}

/// A closed polygon through the given vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCommand {
    style: Style,
    points: Vec<Pos2>,
}

impl PolygonCommand {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    pub fn set_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub fn with_points(mut self, points: Vec<Pos2>) -> Self {
        self.points = points;
        self
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn execute(&self, surface: &mut Surface) {
        if let Some(fill) = self.style.fill_color() {
            surface.fill_polygon(&self.points, fill, CompositeMode::SourceOver);
        }
        if let Some(color) = self.style.outline_color() {
            let stroke = StrokeStyle::new(color, self.style.line_width);
            surface.stroke_polyline(&self.points, true, &stroke);
        }
    }
}
