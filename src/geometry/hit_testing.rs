use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Distance from a handle centre at which the pointer grabs it.
pub const RESIZE_HANDLE_RADIUS: f32 = 6.0;
/// Side of the square drawn for each resize handle.
pub const HANDLE_SIZE: f32 = 7.0;
/// Smallest width or height a selection can be resized to.
pub const MIN_SELECTION_SIZE: f32 = 1.0;

/// One of the nine reference points of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::Center,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// The eight anchors that double as resize handles.
    pub const HANDLES: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Anchor::TopLeft => "Top left",
            Anchor::TopCenter => "Top",
            Anchor::TopRight => "Top right",
            Anchor::MiddleLeft => "Left",
            Anchor::Center => "Center",
            Anchor::MiddleRight => "Right",
            Anchor::BottomLeft => "Bottom left",
            Anchor::BottomCenter => "Bottom",
            Anchor::BottomRight => "Bottom right",
        }
    }

    /// Fractional position of the anchor inside a box, `(0, 0)` being top-left.
    fn fraction(self) -> Vec2 {
        match self {
            Anchor::TopLeft => Vec2::new(0.0, 0.0),
            Anchor::TopCenter => Vec2::new(0.5, 0.0),
            Anchor::TopRight => Vec2::new(1.0, 0.0),
            Anchor::MiddleLeft => Vec2::new(0.0, 0.5),
            Anchor::Center => Vec2::new(0.5, 0.5),
            Anchor::MiddleRight => Vec2::new(1.0, 0.5),
            Anchor::BottomLeft => Vec2::new(0.0, 1.0),
            Anchor::BottomCenter => Vec2::new(0.5, 1.0),
            Anchor::BottomRight => Vec2::new(1.0, 1.0),
        }
    }

    /// Offset of the anchor from the top-left corner of `rect`.
    pub fn offset(self, rect: Rect) -> Vec2 {
        rect.size() * self.fraction()
    }

    /// Position of the anchor on `rect`.
    pub fn point(self, rect: Rect) -> Pos2 {
        rect.min + self.offset(rect)
    }

    /// Whether dragging this handle moves the left/right edge and the top/bottom edge.
    fn moves_edges(self) -> (Option<bool>, Option<bool>) {
        let f = self.fraction();
        let horizontal = if f.x == 0.0 {
            Some(false)
        } else if f.x == 1.0 {
            Some(true)
        } else {
            None
        };
        let vertical = if f.y == 0.0 {
            Some(false)
        } else if f.y == 1.0 {
            Some(true)
        } else {
            None
        };
        (horizontal, vertical)
    }
}

/// Inclusive point-in-rectangle test.
pub fn rect_contains(rect: Rect, point: Pos2) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// True when `point` lies inside the ellipse inscribed in `rect`. Degenerate
/// ellipses contain nothing.
pub fn ellipse_contains(rect: Rect, point: Pos2) -> bool {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let center = rect.center();
    let nx = (point.x - center.x) / rx;
    let ny = (point.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Position of `anchor` on `rect`.
pub fn anchor_point(rect: Rect, anchor: Anchor) -> Pos2 {
    anchor.point(rect)
}

/// The resize handle of `rect` under `pos`, if any.
pub fn anchor_at(rect: Rect, pos: Pos2) -> Option<Anchor> {
    Anchor::HANDLES
        .into_iter()
        .map(|anchor| (anchor, anchor_point(rect, anchor).distance(pos)))
        .filter(|(_, distance)| *distance <= RESIZE_HANDLE_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(anchor, _)| anchor)
}

/// Moves the edges controlled by `handle` so the handle sits at `target`. The
/// result is normalised and never smaller than [`MIN_SELECTION_SIZE`].
pub fn resize_rect(rect: Rect, handle: Anchor, target: Pos2) -> Rect {
    let (horizontal, vertical) = handle.moves_edges();
    let mut min = rect.min;
    let mut max = rect.max;
    match horizontal {
        Some(false) => min.x = target.x,
        Some(true) => max.x = target.x,
        None => {}
    }
    match vertical {
        Some(false) => min.y = target.y,
        Some(true) => max.y = target.y,
        None => {}
    }
    let resized = Rect::from_two_pos(min, max);
    let size = resized.size().max(Vec2::splat(MIN_SELECTION_SIZE));
    Rect::from_min_size(resized.min, size)
}

/// Rounds a rectangle outward to whole pixels and clips it to `bounds`.
pub fn clamp_to_pixels(rect: Rect, bounds: Rect) -> Rect {
    let rounded = Rect::from_min_max(
        Pos2::new(rect.min.x.floor(), rect.min.y.floor()),
        Pos2::new(rect.max.x.ceil(), rect.max.y.ceil()),
    );
    rounded.intersect(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn square() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0))
    }

    #[test]
    fn test_anchor_points() {
        let rect = Rect::from_min_max(pos2(10.0, 20.0), pos2(30.0, 60.0));
        assert_eq!(Anchor::TopLeft.point(rect), pos2(10.0, 20.0));
        assert_eq!(Anchor::Center.point(rect), pos2(20.0, 40.0));
        assert_eq!(Anchor::BottomRight.point(rect), pos2(30.0, 60.0));
        assert_eq!(Anchor::MiddleRight.offset(rect), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_ellipse_contains() {
        assert!(ellipse_contains(square(), pos2(5.0, 5.0)));
        assert!(ellipse_contains(square(), pos2(0.0, 5.0)));
        assert!(!ellipse_contains(square(), pos2(0.5, 0.5)));
        let flat = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!(!ellipse_contains(flat, pos2(5.0, 0.0)));
    }

    #[test]
    fn test_handle_hit_testing() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(40.0, 40.0));
        assert_eq!(anchor_at(rect, pos2(1.0, 1.0)), Some(Anchor::TopLeft));
        assert_eq!(anchor_at(rect, pos2(41.0, 19.0)), Some(Anchor::MiddleRight));
        assert_eq!(anchor_at(rect, pos2(20.0, 20.0)), None);
    }

    #[test]
    fn test_resize_rect_moves_only_controlled_edges() {
        let resized = resize_rect(square(), Anchor::MiddleRight, pos2(25.0, 99.0));
        assert_eq!(resized, Rect::from_min_max(pos2(0.0, 0.0), pos2(25.0, 10.0)));

        let flipped = resize_rect(square(), Anchor::TopLeft, pos2(15.0, 15.0));
        assert_eq!(flipped, Rect::from_min_max(pos2(10.0, 10.0), pos2(15.0, 15.0)));

        let collapsed = resize_rect(square(), Anchor::BottomCenter, pos2(3.0, 0.0));
        assert_eq!(collapsed.height(), MIN_SELECTION_SIZE);
    }
}
