use egui::{Color32, Pos2, Rect};

use crate::surface::{Cap, StrokeStyle, Surface};

pub const DEFAULT_GRID_SIZE: u32 = 25;
pub const MIN_GRID_SIZE: u32 = 5;
pub const MAX_GRID_SIZE: u32 = 100;
/// Amount the grid size changes per keyboard step
pub const GRID_SIZE_STEP: u32 = 5;

/// Square grid overlay. Its spacing is also the step magnetism snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub visible: bool,
    size: u32,
    opacity: f32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            visible: false,
            size: DEFAULT_GRID_SIZE,
            opacity: 0.5,
        }
    }
}

impl Grid {
    pub fn new(size: u32, opacity: f32) -> Self {
        Self {
            visible: false,
            size: size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn spacing(&self) -> f32 {
        self.size as f32
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn increase(&mut self) {
        self.set_size(self.size + GRID_SIZE_STEP);
    }

    pub fn decrease(&mut self) {
        self.set_size(self.size.saturating_sub(GRID_SIZE_STEP));
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Redraws the overlay; an invisible grid leaves the surface transparent.
    pub fn draw(&self, surface: &mut Surface) {
        surface.clear();
        if !self.visible {
            return;
        }
        let color = Color32::from_gray(0x80).gamma_multiply(self.opacity);
        let stroke = StrokeStyle::new(color, 1.0).with_cap(Cap::Butt);
        let Rect { max, .. } = surface.bounds();
        let step = self.spacing();

        let mut x = step;
        while x < max.x {
            // Half-pixel offset keeps one-pixel lines crisp.
            let line_x = x - 0.5;
            surface.stroke_polyline(&[Pos2::new(line_x, 0.0), Pos2::new(line_x, max.y)], false, &stroke);
            x += step;
        }
        let mut y = step;
        while y < max.y {
            let line_y = y - 0.5;
            surface.stroke_polyline(&[Pos2::new(0.0, line_y), Pos2::new(max.x, line_y)], false, &stroke);
            y += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_steps_are_clamped() {
        let mut grid = Grid::new(MAX_GRID_SIZE, 0.5);
        grid.increase();
        assert_eq!(grid.size(), MAX_GRID_SIZE);

        grid.set_size(MIN_GRID_SIZE + 2);
        grid.decrease();
        assert_eq!(grid.size(), MIN_GRID_SIZE);
    }

    #[test]
    fn test_hidden_grid_draws_nothing() {
        let mut surface = Surface::new(20, 20).unwrap();
        let grid = Grid::new(5, 1.0);
        grid.draw(&mut surface);
        assert_eq!(surface.pixel(4, 2), Some(Color32::TRANSPARENT));

        let mut visible = grid;
        visible.toggle();
        visible.draw(&mut surface);
        assert_ne!(surface.pixel(4, 2), Some(Color32::TRANSPARENT));
    }
}
