use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};

use crate::surface::{ImageData, Surface};

/// An image stamped at a point, rotated about its centre and scaled.
#[derive(Clone, PartialEq)]
pub struct StampCommand {
    image: Arc<ImageData>,
    center: Pos2,
    angle_degrees: f32,
    scale: f32,
}

impl std::fmt::Debug for StampCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampCommand")
            .field("image", &self.image.dimensions())
            .field("center", &self.center)
            .field("angle_degrees", &self.angle_degrees)
            .field("scale", &self.scale)
            .finish()
    }
}

impl StampCommand {
    pub fn new(image: Arc<ImageData>) -> Self {
        Self {
            image,
            center: Pos2::ZERO,
            angle_degrees: 0.0,
            scale: 1.0,
        }
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.angle_degrees = angle_degrees;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn image(&self) -> &Arc<ImageData> {
        &self.image
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Unrotated box the stamp is drawn into.
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.image.dimensions();
        Rect::from_center_size(self.center, Vec2::new(width as f32, height as f32) * self.scale)
    }

    pub fn execute(&self, surface: &mut Surface) {
        if self.scale <= 0.0 {
            return;
        }
        surface.draw_image(&self.image, self.bounds(), self.angle_degrees, None);
    }
}
