//! Grid magnetism: snaps selection moves, resizes and nudges so the chosen anchor of
//! the selection box lands on grid intersections.

use egui::{Pos2, Rect, Vec2};

use crate::geometry::{Anchor, round_to_step};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Magnetism {
    pub enabled: bool,
    /// Anchor of the selection box that snaps; top-left when unset
    pub anchor: Option<Anchor>,
}

impl Magnetism {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        log::info!("Magnetism {}", if self.enabled { "on" } else { "off" });
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor.unwrap_or(Anchor::TopLeft)
    }

    /// Translation to apply to the shape described by `current_line` when the
    /// pointer moved from `reference` to `mouse`: the anchor of the shape's bounding
    /// box is moved by the raw delta and then rounded to the grid.
    pub fn dispatch(&self, mouse: Pos2, reference: Pos2, current_line: &[Pos2], grid_size: f32) -> Vec2 {
        let Some(bbox) = bounding_box(current_line) else {
            return mouse - reference;
        };
        self.snap_delta(bbox, mouse - reference, grid_size)
    }

    /// Grid-rounded version of `raw` for a box currently at `bbox`.
    pub fn snap_delta(&self, bbox: Rect, raw: Vec2, grid_size: f32) -> Vec2 {
        let anchor = self.anchor().point(bbox);
        let target = anchor + raw;
        let snapped = Pos2::new(round_to_step(target.x, grid_size), round_to_step(target.y, grid_size));
        snapped - anchor
    }

    /// Snaps a single point, used for the edge dragged during a resize.
    pub fn snap_point(&self, point: Pos2, grid_size: f32) -> Pos2 {
        Pos2::new(round_to_step(point.x, grid_size), round_to_step(point.y, grid_size))
    }

    /// Translation moving the anchor of `bbox` to the next grid line in `direction`
    /// (each component taken by its sign).
    pub fn nudge(&self, bbox: Rect, direction: Vec2, grid_size: f32) -> Vec2 {
        if grid_size <= 0.0 {
            return direction;
        }
        let anchor = self.anchor().point(bbox);
        Vec2::new(
            next_line(anchor.x, direction.x, grid_size) - anchor.x,
            next_line(anchor.y, direction.y, grid_size) - anchor.y,
        )
    }
}

fn next_line(value: f32, direction: f32, step: f32) -> f32 {
    if direction > 0.0 {
        ((value / step).floor() + 1.0) * step
    } else if direction < 0.0 {
        ((value / step).ceil() - 1.0) * step
    } else {
        value
    }
}

fn bounding_box(points: &[Pos2]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(rest.iter().fold(Rect::from_min_max(*first, *first), |rect, p| rect.union(Rect::from_min_max(*p, *p))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn magnet(anchor: Anchor) -> Magnetism {
        Magnetism {
            enabled: true,
            anchor: Some(anchor),
        }
    }

    #[test]
    fn test_dispatch_rounds_anchor_to_grid() {
        let delta = magnet(Anchor::TopLeft).dispatch(
            pos2(60.0, 30.0),
            pos2(30.0, 20.0),
            &[pos2(0.0, 0.0), pos2(50.0, 50.0)],
            10.0,
        );
        assert_eq!(delta, vec2(30.0, 10.0));
    }

    #[test]
    fn test_dispatch_uses_selected_anchor() {
        // Center of (3,3)-(17,17) is (10,10); a raw move of (4,4) lands on (14,14) -> (10,10).
        let delta = magnet(Anchor::Center).dispatch(
            pos2(4.0, 4.0),
            pos2(0.0, 0.0),
            &[pos2(3.0, 3.0), pos2(17.0, 17.0)],
            10.0,
        );
        assert_eq!(delta, vec2(0.0, 0.0));
    }

    #[test]
    fn test_nudge_moves_to_next_grid_line() {
        let bbox = Rect::from_min_max(pos2(12.0, 20.0), pos2(30.0, 40.0));
        let m = magnet(Anchor::TopLeft);
        assert_eq!(m.nudge(bbox, vec2(1.0, 0.0), 10.0), vec2(8.0, 0.0));
        assert_eq!(m.nudge(bbox, vec2(-1.0, 0.0), 10.0), vec2(-2.0, 0.0));
        assert_eq!(m.nudge(bbox, vec2(0.0, -1.0), 10.0), vec2(0.0, -10.0));
    }
}
