//! Click-anchored vertex placement shared by the line and polygon tools.

use egui::Pos2;

use crate::geometry::snap_angle;
use crate::input::{ClickCounter, ClickOutcome};

/// What a pointer press amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Press {
    /// The press is pending; an earlier pending click, if any, was confirmed.
    Pending { confirmed: Option<Pos2> },
    Double(Pos2),
}

/// Vertices placed by confirmed clicks, plus the rubber-band segment to the cursor.
#[derive(Debug, Default)]
pub(crate) struct AnchoredPath {
    points: Vec<Pos2>,
    cursor: Option<Pos2>,
    clicks: ClickCounter,
    shift: bool,
}

impl AnchoredPath {
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn first(&self) -> Option<Pos2> {
        self.points.first().copied()
    }

    pub fn is_pending(&self) -> bool {
        self.clicks.is_pending()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && !self.clicks.is_pending()
    }

    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    /// Applies the 45° constraint relative to the last vertex while Shift is held.
    pub fn constrain(&self, pos: Pos2) -> Pos2 {
        match self.points.last() {
            Some(last) if self.shift => snap_angle(*last, pos),
            _ => pos,
        }
    }

    pub fn press(&mut self, pos: Pos2, time: f64) -> Press {
        match self.clicks.register(pos, time) {
            ClickOutcome::Pending { flushed } => Press::Pending { confirmed: flushed },
            ClickOutcome::Double(pos) => Press::Double(pos),
        }
    }

    pub fn poll(&mut self, now: f64) -> Option<Pos2> {
        self.clicks.poll(now)
    }

    /// Confirms the pending click without waiting for the window.
    pub fn flush(&mut self) -> Option<Pos2> {
        self.clicks.flush()
    }

    pub fn push(&mut self, pos: Pos2) {
        let pos = self.constrain(pos);
        self.points.push(pos);
    }

    /// Appends the vertex verbatim, without the Shift constraint.
    pub fn push_exact(&mut self, pos: Pos2) {
        self.points.push(pos);
    }

    pub fn pop(&mut self) -> Option<Pos2> {
        self.points.pop()
    }

    pub fn set_cursor(&mut self, pos: Pos2) {
        self.cursor = Some(pos);
    }

    /// Vertices, the click awaiting confirmation and the cursor, as shown while placing.
    pub fn preview_points(&self) -> Vec<Pos2> {
        let mut points = self.points.clone();
        if let Some(pending) = self.clicks.pending() {
            points.push(self.constrain(pending));
        }
        if let Some(cursor) = self.cursor {
            if !points.is_empty() {
                points.push(self.constrain(cursor));
            }
        }
        points
    }

    pub fn take(&mut self) -> Vec<Pos2> {
        let points = std::mem::take(&mut self.points);
        self.reset();
        points
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.cursor = None;
        self.clicks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_shift_constrains_relative_to_last_vertex() {
        let mut path = AnchoredPath::default();
        path.push(pos2(0.0, 0.0));
        path.set_shift(true);
        path.push(pos2(10.0, 1.0));
        assert_eq!(path.points(), &[pos2(0.0, 0.0), pos2(10.0, 0.0)]);
    }

    #[test]
    fn test_preview_includes_cursor_once_anchored() {
        let mut path = AnchoredPath::default();
        path.set_cursor(pos2(5.0, 5.0));
        assert!(path.preview_points().is_empty());
        path.push(pos2(0.0, 0.0));
        assert_eq!(path.preview_points(), vec![pos2(0.0, 0.0), pos2(5.0, 5.0)]);
    }
}
