//! Pure geometric helpers shared by tools and commands.

pub mod hit_testing;
pub mod snapping;

pub use hit_testing::{
    Anchor, HANDLE_SIZE, MIN_SELECTION_SIZE, RESIZE_HANDLE_RADIUS, anchor_at, anchor_point,
    clamp_to_pixels, ellipse_contains, rect_contains, resize_rect,
};
pub use snapping::{
    check_if_is_square, closest_square, distance, is_within, rect_from_points, round_to_step,
    snap_angle,
};
