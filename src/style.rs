use egui::Color32;
use serde::{Deserialize, Serialize};

/// Whether a closed shape is outlined, filled, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceType {
    #[default]
    Outline,
    Filled,
    FilledWithOutline,
}

impl TraceType {
    pub const ALL: [TraceType; 3] = [TraceType::Outline, TraceType::Filled, TraceType::FilledWithOutline];

    pub fn label(self) -> &'static str {
        match self {
            TraceType::Outline => "Outline",
            TraceType::Filled => "Filled",
            TraceType::FilledWithOutline => "Filled + outline",
        }
    }
}

/// Drawing style captured by value in every command.
///
/// Outline-only shapes and lines use the primary colour. Filled shapes are filled
/// with the primary colour; when they also carry an outline it uses the secondary
/// colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub primary_color: Color32,
    pub secondary_color: Color32,
    pub line_width: f32,
    pub trace: TraceType,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            primary_color: Color32::BLACK,
            secondary_color: Color32::from_rgb(0x33, 0x66, 0xcc),
            line_width: 3.0,
            trace: TraceType::Outline,
        }
    }
}

impl Style {
    pub fn new(primary_color: Color32, line_width: f32) -> Self {
        Self {
            primary_color,
            line_width,
            ..Self::default()
        }
    }

    pub fn with_secondary(mut self, secondary_color: Color32) -> Self {
        self.secondary_color = secondary_color;
        self
    }

    pub fn with_trace(mut self, trace: TraceType) -> Self {
        self.trace = trace;
        self
    }

    /// Colour used to fill a closed shape, if it is filled at all.
    pub fn fill_color(&self) -> Option<Color32> {
        match self.trace {
            TraceType::Outline => None,
            TraceType::Filled | TraceType::FilledWithOutline => Some(self.primary_color),
        }
    }

    /// Colour used to outline a closed shape, if it is outlined at all.
    pub fn outline_color(&self) -> Option<Color32> {
        match self.trace {
            TraceType::Outline => Some(self.primary_color),
            TraceType::Filled => None,
            TraceType::FilledWithOutline => Some(self.secondary_color),
        }
    }

    /// Swaps primary and secondary colours.
    pub fn swap_colors(&mut self) {
        std::mem::swap(&mut self.primary_color, &mut self.secondary_color);
    }
}
