use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_MAX_HISTORY;
use crate::error::ConfigError;
use crate::style::Style;

/// User-tunable editor settings. Missing fields fall back to their defaults so
/// older settings files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background_color: Color32,
    pub style: Style,
    /// Side of the eraser square, in pixels
    pub eraser_size: f32,
    /// Droplets emitted per second while the airbrush is held
    pub airbrush_emission_rate: f32,
    pub airbrush_jet_diameter: f32,
    pub airbrush_droplet_diameter: f32,
    /// Paint bucket colour tolerance in percent
    pub bucket_tolerance: f32,
    /// Diameter of the circle drawn at every line vertex; `None` draws none
    pub line_junction_diameter: Option<f32>,
    pub stamp_scale: f32,
    pub grid_size: u32,
    pub grid_opacity: f32,
    pub show_grid: bool,
    pub magnetism: bool,
    pub max_history: usize,
    /// Directory the gallery stores drawings in
    pub storage_dir: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 800,
            background_color: Color32::WHITE,
            style: Style::default(),
            eraser_size: 10.0,
            airbrush_emission_rate: 300.0,
            airbrush_jet_diameter: 30.0,
            airbrush_droplet_diameter: 2.0,
            bucket_tolerance: 15.0,
            line_junction_diameter: None,
            stamp_scale: 1.0,
            grid_size: crate::grid::DEFAULT_GRID_SIZE,
            grid_opacity: 0.5,
            show_grid: false,
            magnetism: false,
            max_history: DEFAULT_MAX_HISTORY,
            storage_dir: PathBuf::from("drawings"),
        }
    }
}

impl EditorSettings {
    /// Reads settings from a JSON file. A missing or empty file yields the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Self = serde_json::from_str(&content)?;
        settings.validate();
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamps out-of-range values back into their allowed ranges.
    pub fn validate(&mut self) {
        self.canvas_width = self.canvas_width.clamp(1, 8192);
        self.canvas_height = self.canvas_height.clamp(1, 8192);
        self.style.line_width = self.style.line_width.clamp(1.0, 100.0);
        self.eraser_size = self.eraser_size.clamp(1.0, 200.0);
        self.airbrush_emission_rate = self.airbrush_emission_rate.clamp(1.0, 5000.0);
        self.airbrush_jet_diameter = self.airbrush_jet_diameter.clamp(1.0, 500.0);
        self.airbrush_droplet_diameter = self.airbrush_droplet_diameter.clamp(0.5, 50.0);
        self.bucket_tolerance = self.bucket_tolerance.clamp(0.0, 100.0);
        self.line_junction_diameter = self.line_junction_diameter.filter(|d| *d > 0.0);
        self.stamp_scale = self.stamp_scale.clamp(0.1, 10.0);
        self.grid_size = self
            .grid_size
            .clamp(crate::grid::MIN_GRID_SIZE, crate::grid::MAX_GRID_SIZE);
        self.grid_opacity = self.grid_opacity.clamp(0.0, 1.0);
        self.max_history = self.max_history.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: EditorSettings = serde_json::from_str(r#"{ "eraser_size": 42.0 }"#).unwrap();
        assert_eq!(settings.eraser_size, 42.0);
        assert_eq!(settings.canvas_width, 1000);
        assert_eq!(settings.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn test_validate_clamps() {
        let mut settings = EditorSettings {
            bucket_tolerance: 250.0,
            grid_size: 1,
            max_history: 0,
            line_junction_diameter: Some(-3.0),
            ..Default::default()
        };
        settings.validate();
        assert_eq!(settings.bucket_tolerance, 100.0);
        assert_eq!(settings.grid_size, crate::grid::MIN_GRID_SIZE);
        assert_eq!(settings.max_history, 1);
        assert_eq!(settings.line_junction_diameter, None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("raster_paint_settings_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = EditorSettings {
            show_grid: true,
            bucket_tolerance: 30.0,
            ..Default::default()
        };
        settings.save_to_file(&path).unwrap();
        assert_eq!(EditorSettings::load_from_file(&path).unwrap(), settings);

        let missing = EditorSettings::load_from_file(dir.join("missing.json")).unwrap();
        assert_eq!(missing, EditorSettings::default());
        std::fs::remove_dir_all(&dir).ok();
    }
}
