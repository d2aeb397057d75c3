use egui::{Pos2, Rect};
use std::f32::consts::FRAC_PI_4;

/// Returns true when the box spanned by `start` and `end` has equal sides.
/// A single repeated point counts as a square.
pub fn check_if_is_square(start: Pos2, end: Pos2) -> bool {
    (end.x - start.x).abs() == (end.y - start.y).abs()
}

/// Shrinks the longer side of the box spanned by `start` and `end` so both sides
/// match, keeping `start` fixed and the drag direction of each axis.
pub fn closest_square(start: Pos2, end: Pos2) -> (Pos2, Pos2) {
    if check_if_is_square(start, end) {
        return (start, end);
    }
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let side = dx.abs().min(dy.abs());
    let mut snapped = end;
    if dx.abs() > side {
        snapped.x = start.x + side * dx.signum();
    }
    if dy.abs() > side {
        snapped.y = start.y + side * dy.signum();
    }
    (start, snapped)
}

/// Constrains `end` so the segment from `start` lies on a multiple of 45°.
pub fn snap_angle(start: Pos2, end: Pos2) -> Pos2 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0.0 && dy == 0.0 {
        return end;
    }
    let octant = (dy.atan2(dx) / FRAC_PI_4).round() as i32;
    match octant.rem_euclid(4) {
        // Horizontal.
        0 => Pos2::new(end.x, start.y),
        // Vertical.
        2 => Pos2::new(start.x, end.y),
        _ => {
            let length = (dx.abs() + dy.abs()) / 2.0;
            Pos2::new(start.x + length * dx.signum(), start.y + length * dy.signum())
        }
    }
}

pub fn distance(a: Pos2, b: Pos2) -> f32 {
    a.distance(b)
}

/// True when `a` and `b` are at most `threshold` pixels apart.
pub fn is_within(a: Pos2, b: Pos2, threshold: f32) -> bool {
    distance(a, b) <= threshold
}

/// Normalised rectangle spanned by two corner points, in either order.
pub fn rect_from_points(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Rounds `value` to the nearest multiple of `step`. A non-positive step is a no-op.
pub fn round_to_step(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_single_point_is_square() {
        let p = pos2(3.0, 7.0);
        assert!(check_if_is_square(p, p));
        assert_eq!(closest_square(p, p), (p, p));
    }

    #[test]
    fn test_closest_square_is_idempotent_on_squares() {
        let square = (pos2(10.0, 10.0), pos2(30.0, -10.0));
        assert_eq!(closest_square(square.0, square.1), square);
        let (a, b) = closest_square(pos2(0.0, 0.0), pos2(40.0, 10.0));
        assert_eq!(closest_square(a, b), (a, b));
    }

    #[test]
    fn test_closest_square_keeps_direction() {
        let (start, end) = closest_square(pos2(10.0, 10.0), pos2(0.0, 40.0));
        assert_eq!(start, pos2(10.0, 10.0));
        assert_eq!(end, pos2(0.0, 20.0));
    }

    #[test]
    fn test_snap_angle() {
        let origin = pos2(0.0, 0.0);
        assert_eq!(snap_angle(origin, pos2(10.0, 2.0)), pos2(10.0, 0.0));
        assert_eq!(snap_angle(origin, pos2(-1.0, -12.0)), pos2(0.0, -12.0));
        assert_eq!(snap_angle(origin, pos2(9.0, 11.0)), pos2(10.0, 10.0));
        assert_eq!(snap_angle(origin, pos2(-9.0, 11.0)), pos2(-10.0, 10.0));
        assert_eq!(snap_angle(origin, origin), origin);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(34.0, 10.0), 30.0);
        assert_eq!(round_to_step(35.0, 10.0), 40.0);
        assert_eq!(round_to_step(7.0, 0.0), 7.0);
    }
}
