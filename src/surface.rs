//! Pixel surfaces backed by [`tiny_skia::Pixmap`].
//!
//! A [`Surface`] is the only thing commands and tools draw on. It exposes a small,
//! canvas-like API: clear, primitive fills and strokes, image blits and raw pixel
//! buffer access ([`Surface::get_image_data`] / [`Surface::put_image_data`]).

use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::error::SurfaceError;

/// Straight-alpha RGBA pixel buffer, the unit exchanged with surfaces and the clipboard.
pub type ImageData = RgbaImage;

/// How new pixels are combined with the pixels already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing pixels.
    #[default]
    SourceOver,
    /// Punch out existing pixels wherever the shape covers them.
    DestinationOut,
    /// Replace existing pixels.
    Copy,
}

impl CompositeMode {
    fn blend_mode(self) -> BlendMode {
        match self {
            Self::SourceOver => BlendMode::SourceOver,
            Self::DestinationOut => BlendMode::DestinationOut,
            Self::Copy => BlendMode::Source,
        }
    }
}

/// End caps and joins used by strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cap {
    #[default]
    Round,
    Square,
    Butt,
}

/// Stroke parameters for outlines and polylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: Cap,
    pub composite: CompositeMode,
    pub dashed: bool,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            cap: Cap::Round,
            composite: CompositeMode::SourceOver,
            dashed: false,
        }
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_composite(mut self, composite: CompositeMode) -> Self {
        self.composite = composite;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn to_skia(self) -> tiny_skia::Stroke {
        let (line_cap, line_join) = match self.cap {
            Cap::Round => (tiny_skia::LineCap::Round, tiny_skia::LineJoin::Round),
            Cap::Square => (tiny_skia::LineCap::Square, tiny_skia::LineJoin::Miter),
            Cap::Butt => (tiny_skia::LineCap::Butt, tiny_skia::LineJoin::Miter),
        };
        tiny_skia::Stroke {
            width: self.width.max(0.0),
            line_cap,
            line_join,
            dash: if self.dashed {
                tiny_skia::StrokeDash::new(vec![4.0, 4.0], 0.0)
            } else {
                None
            },
            ..tiny_skia::Stroke::default()
        }
    }
}

/// Region used to clip an image blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    Ellipse(Rect),
}

/// A logical drawing target backed by a premultiplied RGBA pixmap.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
    revision: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocates a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self { pixmap, revision: 0 })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size())
    }

    /// Incremented by every mutation; lets the shell skip unchanged texture uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.touch();
    }

    /// Replaces every pixel with `color`.
    pub fn fill(&mut self, color: Color32) {
        self.pixmap.fill(skia_color(color));
        self.touch();
    }

    /// Replaces this surface's pixels with a copy of `other`'s when sizes match.
    pub fn copy_from(&mut self, other: &Surface) {
        if self.width() == other.width() && self.height() == other.height() {
            self.pixmap.data_mut().copy_from_slice(other.pixmap.data());
        } else {
            log::warn!(
                "Refusing to copy a {}x{} surface onto a {}x{} one",
                other.width(),
                other.height(),
                self.width(),
                self.height()
            );
        }
        self.touch();
    }

    /// Draws `other` on top of this surface.
    pub fn composite_over(&mut self, other: &Surface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            other.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.touch();
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color32, composite: CompositeMode) {
        if let Some(rect) = skia_rect(rect) {
            let paint = paint(color, composite);
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            self.touch();
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        if let Some(rect) = skia_rect(rect) {
            let path = PathBuilder::from_rect(rect);
            self.stroke_skia_path(&path, stroke);
        }
    }

    pub fn fill_ellipse(&mut self, rect: Rect, color: Color32, composite: CompositeMode) {
        if let Some(path) = skia_rect(rect).and_then(PathBuilder::from_oval) {
            let paint = paint(color, composite);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            self.touch();
        }
    }

    pub fn stroke_ellipse(&mut self, rect: Rect, stroke: &StrokeStyle) {
        if let Some(path) = skia_rect(rect).and_then(PathBuilder::from_oval) {
            self.stroke_skia_path(&path, stroke);
        }
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, composite: CompositeMode) {
        if radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            let paint = paint(color, composite);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            self.touch();
        }
    }

    /// Fills an axis-aligned square of side `size` centred on `center`.
    pub fn fill_square(&mut self, center: Pos2, size: f32, color: Color32, composite: CompositeMode) {
        let rect = Rect::from_center_size(center, Vec2::splat(size));
        self.fill_rect(rect, color, composite);
    }

    /// Strokes the path through `points` in order. A single point becomes a dot.
    pub fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, stroke: &StrokeStyle) {
        match points {
            [] => {}
            [point] => match stroke.cap {
                Cap::Round => self.fill_circle(*point, stroke.width / 2.0, stroke.color, stroke.composite),
                Cap::Square | Cap::Butt => {
                    self.fill_square(*point, stroke.width, stroke.color, stroke.composite)
                }
            },
            _ => {
                if let Some(path) = polyline_path(points, closed) {
                    self.stroke_skia_path(&path, stroke);
                }
            }
        }
    }

    pub fn fill_polygon(&mut self, points: &[Pos2], color: Color32, composite: CompositeMode) {
        if points.len() < 3 {
            return;
        }
        if let Some(path) = polyline_path(points, true) {
            let paint = paint(color, composite);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            self.touch();
        }
    }

    fn stroke_skia_path(&mut self, path: &tiny_skia::Path, stroke: &StrokeStyle) {
        if stroke.width <= 0.0 {
            return;
        }
        let paint = paint(stroke.color, stroke.composite);
        self.pixmap
            .stroke_path(path, &paint, &stroke.to_skia(), Transform::identity(), None);
        self.touch();
    }

    /// Reads the pixels under `rect` (rounded to whole pixels). Pixels outside the
    /// surface read as transparent.
    pub fn get_image_data(&self, rect: Rect) -> ImageData {
        let x0 = rect.min.x.round() as i64;
        let y0 = rect.min.y.round() as i64;
        let width = (rect.max.x.round() as i64 - x0).max(0) as u32;
        let height = (rect.max.y.round() as i64 - y0).max(0) as u32;

        let mut image = RgbaImage::new(width, height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let sx = x0 + x as i64;
            let sy = y0 + y as i64;
            if sx < 0 || sy < 0 {
                continue;
            }
            if let Some(color) = self.pixmap.pixel(sx as u32, sy as u32) {
                let color = color.demultiply();
                *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
            }
        }
        image
    }

    /// The whole surface as straight-alpha pixels.
    pub fn to_image_data(&self) -> ImageData {
        self.get_image_data(self.bounds())
    }

    /// Writes `image` with its top-left corner at `origin`, replacing the pixels
    /// underneath (no blending), like a canvas `putImageData`.
    pub fn put_image_data(&mut self, image: &ImageData, origin: Pos2) {
        let ox = origin.x.round() as i64;
        let oy = origin.y.round() as i64;
        let width = self.width() as i64;
        let height = self.height() as i64;
        let pixels = self.pixmap.pixels_mut();
        for (x, y, pixel) in image.enumerate_pixels() {
            let tx = ox + x as i64;
            let ty = oy + y as i64;
            if tx < 0 || ty < 0 || tx >= width || ty >= height {
                continue;
            }
            let [r, g, b, a] = pixel.0;
            pixels[(ty * width + tx) as usize] = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        self.touch();
    }

    /// Blends `image` unscaled with its top-left corner at `origin`.
    pub fn draw_image_at(&mut self, image: &ImageData, origin: Pos2) {
        if let Some(source) = image_to_pixmap(image) {
            self.pixmap.draw_pixmap(
                origin.x.round() as i32,
                origin.y.round() as i32,
                source.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            self.touch();
        }
    }

    /// Blends `image` scaled into `dest`, rotated by `angle_degrees` around the centre
    /// of `dest`, optionally clipped.
    pub fn draw_image(&mut self, image: &ImageData, dest: Rect, angle_degrees: f32, clip: Option<Clip>) {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }
        let Some(source) = image_to_pixmap(image) else {
            return;
        };

        let sx = dest.width() / source.width() as f32;
        let sy = dest.height() / source.height() as f32;
        let center = dest.center();
        let transform = Transform::from_rotate_at(angle_degrees, center.x, center.y)
            .pre_concat(Transform::from_translate(dest.min.x, dest.min.y).pre_scale(sx, sy));

        let mask = clip.and_then(|clip| self.clip_mask(clip));
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            transform,
            mask.as_ref(),
        );
        self.touch();
    }

    fn clip_mask(&self, clip: Clip) -> Option<Mask> {
        let mut mask = Mask::new(self.width(), self.height())?;
        match clip {
            Clip::Ellipse(rect) => {
                let path = PathBuilder::from_oval(skia_rect(rect)?)?;
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
            }
        }
        Some(mask)
    }

    /// Premultiplied colour of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color32> {
        if x < 0 || y < 0 {
            return None;
        }
        let color = self.pixmap.pixel(x as u32, y as u32)?;
        Some(Color32::from_rgba_premultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Converts the surface into an egui image for texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }
}

/// Converts an egui colour to a tiny-skia colour.
pub fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// A straight-alpha image filled with one colour.
pub fn solid_image(width: u32, height: u32, color: Color32) -> ImageData {
    RgbaImage::from_pixel(width, height, Rgba(color.to_srgba_unmultiplied()))
}

/// Makes every pixel of `image` outside the inscribed ellipse transparent.
pub fn mask_to_ellipse(image: &mut ImageData) {
    let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(image.width() as f32, image.height() as f32));
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
        if !crate::geometry::ellipse_contains(rect, center) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

fn paint(color: Color32, composite: CompositeMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint.blend_mode = composite.blend_mode();
    paint
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

fn polyline_path(points: &[Pos2], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    if closed {
        builder.close();
    }
    builder.finish()
}

fn image_to_pixmap(image: &ImageData) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (target, pixel) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = pixel.0;
        *target = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_fill_rect_covers_pixels() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.fill_rect(Rect::from_min_max(pos2(1.0, 1.0), pos2(3.0, 3.0)), Color32::RED, CompositeMode::SourceOver);

        assert_eq!(surface.pixel(1, 1), Some(Color32::RED));
        assert_eq!(surface.pixel(2, 2), Some(Color32::RED));
        assert_eq!(surface.pixel(0, 0), Some(Color32::TRANSPARENT));
        assert_eq!(surface.pixel(9, 9), None);
    }

    #[test]
    fn test_zero_size_primitives_are_ignored() {
        let mut surface = Surface::new(4, 4).unwrap();
        let revision = surface.revision();
        let empty = Rect::from_min_max(pos2(2.0, 2.0), pos2(2.0, 2.0));
        surface.fill_rect(empty, Color32::RED, CompositeMode::SourceOver);
        surface.fill_ellipse(empty, Color32::RED, CompositeMode::SourceOver);
        surface.fill_polygon(&[pos2(0.0, 0.0), pos2(1.0, 1.0)], Color32::RED, CompositeMode::SourceOver);
        assert_eq!(surface.revision(), revision);
    }

    #[test]
    fn test_image_data_round_trip_through_put() {
        let mut source = Surface::new(3, 3).unwrap();
        source.fill(Color32::BLUE);
        let image = source.get_image_data(Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 2.0)));
        assert_eq!(image.dimensions(), (2, 2));

        let mut target = Surface::new(3, 3).unwrap();
        target.put_image_data(&image, pos2(1.0, 1.0));
        assert_eq!(target.pixel(0, 0), Some(Color32::TRANSPARENT));
        assert_eq!(target.pixel(2, 2), Some(Color32::BLUE));
    }

    #[test]
    fn test_get_image_data_outside_bounds_is_transparent() {
        let mut surface = Surface::new(2, 2).unwrap();
        surface.fill(Color32::GREEN);
        let image = surface.get_image_data(Rect::from_min_max(pos2(-1.0, -1.0), pos2(1.0, 1.0)));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(1, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_destination_out_erases() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.fill(Color32::BLACK);
        surface.fill_square(pos2(2.0, 2.0), 2.0, Color32::BLACK, CompositeMode::DestinationOut);
        assert_eq!(surface.pixel(1, 1), Some(Color32::TRANSPARENT));
        assert_eq!(surface.pixel(0, 0), Some(Color32::BLACK));
    }

    #[test]
    fn test_invalid_size_is_an_error() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidSize { width: 0, height: 10 })
        ));
    }
}
