use std::collections::VecDeque;
use std::sync::Arc;

use egui::{Color32, Pos2};
use image::Rgba;

use crate::surface::{ImageData, Surface};

/// True when every channel of `a` is within `tolerance` percent of `b`.
/// A tolerance of 0 matches exactly, 100 matches everything.
pub fn colors_match(a: Rgba<u8>, b: Rgba<u8>, tolerance: f32) -> bool {
    let limit = (tolerance.clamp(0.0, 100.0) / 100.0 * 255.0).round() as i16;
    a.0.iter()
        .zip(b.0.iter())
        .all(|(x, y)| (*x as i16 - *y as i16).abs() <= limit)
}

/// Computes the pixels a bucket fill at `origin` paints on an image the size of
/// `source`: `color` where the fill reaches, transparent elsewhere.
///
/// With `contiguous` set only the 4-connected region around `origin` whose colour
/// matches the clicked pixel is filled; otherwise every matching pixel is.
/// Returns `None` when `origin` lies outside the image.
pub fn flood_fill(
    source: &ImageData,
    origin: Pos2,
    color: Color32,
    tolerance: f32,
    contiguous: bool,
) -> Option<ImageData> {
    let (width, height) = source.dimensions();
    if origin.x < 0.0 || origin.y < 0.0 {
        return None;
    }
    let (ox, oy) = (origin.x.floor() as u32, origin.y.floor() as u32);
    if ox >= width || oy >= height {
        return None;
    }

    let target = *source.get_pixel(ox, oy);
    let paint = Rgba(color.to_srgba_unmultiplied());
    let mut layer = ImageData::new(width, height);

    if !contiguous {
        for (x, y, pixel) in source.enumerate_pixels() {
            if colors_match(*pixel, target, tolerance) {
                layer.put_pixel(x, y, paint);
            }
        }
        return Some(layer);
    }

    let mut visited = vec![false; (width * height) as usize];
    let mut queue = VecDeque::new();
    visited[(oy * width + ox) as usize] = true;
    queue.push_back((ox, oy));

    while let Some((x, y)) = queue.pop_front() {
        layer.put_pixel(x, y, paint);

        let neighbours = [
            (x.checked_sub(1), Some(y)),
            ((x + 1 < width).then_some(x + 1), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x), (y + 1 < height).then_some(y + 1)),
        ];
        for (nx, ny) in neighbours {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            let index = (ny * width + nx) as usize;
            if !visited[index] && colors_match(*source.get_pixel(nx, ny), target, tolerance) {
                visited[index] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    Some(layer)
}

/// A precomputed bucket fill. `fill` covers the whole canvas and is transparent
/// outside the filled region, so execution is a plain blend.
#[derive(Clone, PartialEq)]
pub struct PaintBucketCommand {
    origin: Pos2,
    fill: Arc<ImageData>,
}

impl std::fmt::Debug for PaintBucketCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintBucketCommand")
            .field("origin", &self.origin)
            .field("fill", &self.fill.dimensions())
            .finish()
    }
}

impl PaintBucketCommand {
    pub fn new(origin: Pos2, fill: ImageData) -> Self {
        Self {
            origin,
            fill: Arc::new(fill),
        }
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn fill(&self) -> &ImageData {
        &self.fill
    }

    pub fn execute(&self, surface: &mut Surface) {
        surface.draw_image_at(&self.fill, Pos2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn split_image() -> ImageData {
        // Left half white, right half black, with a white column at x = 3.
        ImageData::from_fn(4, 2, |x, _| {
            if x == 0 || x == 3 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_contiguous_fill_stops_at_borders() {
        let fill = flood_fill(&split_image(), pos2(0.5, 0.5), Color32::RED, 0.0, true).unwrap();
        assert_eq!(fill.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(fill.get_pixel(1, 0).0, [0, 0, 0, 0]);
        assert_eq!(fill.get_pixel(3, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_global_fill_reaches_every_matching_pixel() {
        let fill = flood_fill(&split_image(), pos2(0.0, 0.0), Color32::RED, 0.0, false).unwrap();
        assert_eq!(fill.get_pixel(3, 1).0, [255, 0, 0, 255]);
        assert_eq!(fill.get_pixel(2, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_full_tolerance_fills_everything() {
        let fill = flood_fill(&split_image(), pos2(0.0, 0.0), Color32::RED, 100.0, true).unwrap();
        assert!(fill.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_outside_origin_is_ignored() {
        assert!(flood_fill(&split_image(), pos2(-1.0, 0.0), Color32::RED, 0.0, true).is_none());
        assert!(flood_fill(&split_image(), pos2(4.0, 0.0), Color32::RED, 0.0, true).is_none());
    }

    #[test]
    fn test_colors_match_tolerance() {
        let a = Rgba([100, 100, 100, 255]);
        let b = Rgba([110, 100, 100, 255]);
        assert!(!colors_match(a, b, 0.0));
        assert!(colors_match(a, b, 5.0));
    }
}
