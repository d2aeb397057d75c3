use egui::Pos2;

use crate::style::Style;
use crate::surface::{CompositeMode, StrokeStyle, Surface};

/// A polyline through a list of points: a line tool polyline or a pencil path.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCommand {
    style: Style,
    points: Vec<Pos2>,
    junction_diameter: Option<f32>,
    closed: bool,
}

impl LineCommand {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            points: Vec::new(),
            junction_diameter: None,
            closed: false,
        }
    }

    pub fn set_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub fn with_points(mut self, points: Vec<Pos2>) -> Self {
        self.points = points;
        self
    }

    pub fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Draw a filled circle of this diameter at every vertex.
    pub fn set_junction(&mut self, diameter: Option<f32>) {
        self.junction_diameter = diameter.filter(|d| *d > 0.0);
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn junction_diameter(&self) -> Option<f32> {
        self.junction_diameter
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    pub fn execute(&self, surface: &mut Surface) {
        let stroke = StrokeStyle::new(self.style.primary_color, self.style.line_width);
        surface.stroke_polyline(&self.points, self.closed, &stroke);

        if let Some(diameter) = self.junction_diameter {
            for point in &self.points {
                surface.fill_circle(
                    *point,
                    diameter / 2.0,
                    self.style.primary_color,
                    CompositeMode::SourceOver,
                );
            }
        }
    }
}
