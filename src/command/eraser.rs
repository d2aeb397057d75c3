use egui::{Color32, Pos2};

use crate::surface::{Cap, CompositeMode, StrokeStyle, Surface};

/// Punches a square-tipped path out of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EraserCommand {
    size: f32,
    points: Vec<Pos2>,
}

impl EraserCommand {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            points: Vec::new(),
        }
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub fn with_points(mut self, points: Vec<Pos2>) -> Self {
        self.points = points;
        self
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn execute(&self, surface: &mut Surface) {
        if self.size <= 0.0 {
            return;
        }
        // Colour is irrelevant for destination-out, only coverage counts.
        let stroke = StrokeStyle::new(Color32::BLACK, self.size)
            .with_cap(Cap::Square)
            .with_composite(CompositeMode::DestinationOut);
        surface.stroke_polyline(&self.points, false, &stroke);
    }
}
