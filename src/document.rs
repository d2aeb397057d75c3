use egui::{Color32, Pos2, Rect, Vec2};

use crate::error::SurfaceError;
use crate::surface::{ImageData, Surface};

/// The drawing being edited: a stack of same-sized surfaces.
///
/// `base` holds committed pixels and is the only surface commands draw on.
/// `preview` shows the gesture in progress, `background` is filled with the
/// background colour and `grid` holds the grid overlay.
#[derive(Debug, Clone)]
pub struct Document {
    background_color: Color32,
    base: Surface,
    preview: Surface,
    background: Surface,
    grid: Surface,
}

impl Document {
    pub fn new(width: u32, height: u32, background_color: Color32) -> Result<Self, SurfaceError> {
        let mut background = Surface::new(width, height)?;
        background.fill(background_color);
        Ok(Self {
            background_color,
            base: Surface::new(width, height)?,
            preview: Surface::new(width, height)?,
            background,
            grid: Surface::new(width, height)?,
        })
    }

    /// Builds a document whose base starts out with the given pixels.
    pub fn from_image(image: &ImageData, background_color: Color32) -> Result<Self, SurfaceError> {
        let mut document = Self::new(image.width(), image.height(), background_color)?;
        document.base.put_image_data(image, Pos2::ZERO);
        Ok(document)
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    pub fn size(&self) -> Vec2 {
        self.base.size()
    }

    pub fn bounds(&self) -> Rect {
        self.base.bounds()
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width() as f32 && pos.y < self.height() as f32
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn base(&self) -> &Surface {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Surface {
        &mut self.base
    }

    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut Surface {
        &mut self.preview
    }

    pub fn background(&self) -> &Surface {
        &self.background
    }

    pub fn grid(&self) -> &Surface {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Surface {
        &mut self.grid
    }

    /// Both the preview and the base, for code that reads one while drawing on the other.
    pub fn base_and_preview_mut(&mut self) -> (&Surface, &mut Surface) {
        (&self.base, &mut self.preview)
    }

    pub fn clear_preview(&mut self) {
        self.preview.clear();
    }

    /// Background and base composited into one image, as saved and as sampled by the pipette.
    pub fn flatten(&self) -> ImageData {
        let mut flat = self.background.clone();
        flat.composite_over(&self.base);
        flat.to_image_data()
    }

    /// Colour of the flattened drawing at `pos`, `None` outside the canvas.
    pub fn sample(&self, pos: Pos2) -> Option<Color32> {
        if !self.contains(pos) {
            return None;
        }
        let rect = Rect::from_min_size(Pos2::new(pos.x.floor(), pos.y.floor()), Vec2::splat(1.0));
        let mut flat = self.background.get_image_data(rect);
        let top = self.base.get_image_data(rect);
        image::imageops::overlay(&mut flat, &top, 0, 0);
        let [r, g, b, a] = flat.get_pixel(0, 0).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CompositeMode;
    use egui::pos2;

    #[test]
    fn test_sample_blends_base_over_background() {
        let mut document = Document::new(4, 4, Color32::WHITE).unwrap();
        document.base_mut().fill_rect(
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::RED,
            CompositeMode::SourceOver,
        );
        assert_eq!(document.sample(pos2(0.5, 0.5)), Some(Color32::RED));
        assert_eq!(document.sample(pos2(2.0, 2.0)), Some(Color32::WHITE));
        assert_eq!(document.sample(pos2(4.0, 0.0)), None);
        assert_eq!(document.sample(pos2(-0.5, 0.0)), None);
    }

    #[test]
    fn test_flatten_is_opaque() {
        let document = Document::new(2, 2, Color32::WHITE).unwrap();
        let flat = document.flatten();
        assert!(flat.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
