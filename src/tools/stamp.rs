use std::path::Path;
use std::sync::Arc;

use egui::{Color32, Key, Modifiers, Pos2, Vec2, pos2};

use super::{Tool, draw_preview};
use crate::command::StampCommand;
use crate::error::StampError;
use crate::input::PointerEvent;
use crate::state::EditorContext;
use crate::surface::{CompositeMode, ImageData, Surface};

/// Rotation per wheel notch, in degrees.
pub const ROTATION_STEP: f32 = 15.0;
/// Rotation per wheel notch while Alt is held.
pub const FINE_ROTATION_STEP: f32 = 1.0;

const BUILTIN_SIZE: u32 = 48;

/// Loads a stamp image from disk.
pub fn load_stamp(path: impl AsRef<Path>) -> Result<ImageData, StampError> {
    let image = image::open(path)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(StampError::Empty);
    }
    Ok(image)
}

/// Decodes a stamp image from encoded bytes (PNG, JPEG, ...).
pub fn load_stamp_bytes(bytes: &[u8]) -> Result<ImageData, StampError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(StampError::Empty);
    }
    Ok(image)
}

/// The stamps that ship with the editor, drawn in `color`.
pub fn builtin_stamps(color: Color32) -> Vec<(String, ImageData)> {
    let size = BUILTIN_SIZE as f32;
    let center = pos2(size / 2.0, size / 2.0);

    let star: Vec<Pos2> = (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { size / 2.0 } else { size / 5.0 };
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            center + Vec2::angled(angle) * radius
        })
        .collect();
    let diamond = vec![pos2(size / 2.0, 0.0), pos2(size, size / 2.0), pos2(size / 2.0, size), pos2(0.0, size / 2.0)];

    let shapes: [(&str, Box<dyn Fn(&mut Surface) + '_>); 3] = [
        ("Star", Box::new(|s: &mut Surface| s.fill_polygon(&star, color, CompositeMode::SourceOver))),
        (
            "Dot",
            Box::new(|s: &mut Surface| s.fill_circle(center, size / 2.0, color, CompositeMode::SourceOver)),
        ),
        ("Diamond", Box::new(|s: &mut Surface| s.fill_polygon(&diamond, color, CompositeMode::SourceOver))),
    ];

    shapes
        .into_iter()
        .filter_map(|(name, draw)| {
            let mut surface = Surface::new(BUILTIN_SIZE, BUILTIN_SIZE).ok()?;
            draw(&mut surface);
            Some((name.to_owned(), surface.to_image_data()))
        })
        .collect()
}

/// Stamps the selected image where the pointer is clicked. The preview follows the
/// pointer; the wheel rotates the stamp.
#[derive(Debug)]
pub struct StampTool {
    builtin: Vec<(String, Arc<ImageData>)>,
    custom: Vec<(String, Arc<ImageData>)>,
    selected: usize,
    angle_degrees: f32,
    scale: f32,
    cursor: Option<Pos2>,
}

impl StampTool {
    pub fn new(scale: f32) -> Self {
        Self {
            builtin: Self::tinted_builtins(Color32::BLACK),
            custom: Vec::new(),
            selected: 0,
            angle_degrees: 0.0,
            scale,
            cursor: None,
        }
    }

    fn tinted_builtins(color: Color32) -> Vec<(String, Arc<ImageData>)> {
        builtin_stamps(color)
            .into_iter()
            .map(|(name, image)| (name, Arc::new(image)))
            .collect()
    }

    /// Adds a stamp to the library and selects it.
    pub fn add_stamp(&mut self, name: impl Into<String>, image: ImageData) {
        self.custom.push((name.into(), Arc::new(image)));
        self.selected = self.builtin.len() + self.custom.len() - 1;
    }

    pub fn stamp_names(&self) -> Vec<&str> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.builtin.len() + self.custom.len() {
            self.selected = index;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn current(&self) -> Option<&Arc<ImageData>> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .nth(self.selected)
            .map(|(_, image)| image)
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.01);
    }

    /// Rotates by one step per notch; positive `notches` turn clockwise.
    pub fn rotate(&mut self, notches: f32, fine: bool) {
        let step = if fine { FINE_ROTATION_STEP } else { ROTATION_STEP };
        self.angle_degrees = (self.angle_degrees + notches.signum() * step).rem_euclid(360.0);
    }

    fn command_at(&self, center: Pos2) -> Option<StampCommand> {
        let mut command = StampCommand::new(Arc::clone(self.current()?));
        command.set_center(center);
        command.set_angle(self.angle_degrees);
        command.set_scale(self.scale);
        Some(command)
    }

    fn redraw(&self, ctx: &mut EditorContext) {
        match self.cursor.and_then(|pos| self.command_at(pos)) {
            Some(command) => draw_preview(ctx, command),
            None => ctx.document.clear_preview(),
        }
    }
}

impl Tool for StampTool {
    fn name(&self) -> &'static str {
        "Stamp"
    }

    fn activate(&mut self, ctx: &mut EditorContext) {
        self.builtin = Self::tinted_builtins(ctx.style.primary_color);
        self.scale = ctx.settings.stamp_scale;
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        if let Some(command) = self.command_at(event.pos) {
            ctx.begin_gesture();
            ctx.commit(command);
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        self.cursor = Some(event.pos);
        self.redraw(ctx);
    }

    fn on_pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut EditorContext) {}

    fn on_wheel(&mut self, delta: Vec2, modifiers: Modifiers, ctx: &mut EditorContext) {
        if delta.y == 0.0 {
            return;
        }
        self.rotate(delta.y, modifiers.alt);
        self.redraw(ctx);
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _time: f64, ctx: &mut EditorContext) -> bool {
        if key == Key::Escape && self.cursor.is_some() {
            self.cancel(ctx);
            return true;
        }
        false
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        self.cursor = None;
        ctx.document.clear_preview();
    }

    fn is_busy(&self) -> bool {
        false
    }

    fn state_name(&self) -> &'static str {
        if self.cursor.is_some() { "Hovering" } else { "Idle" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stamps_are_not_blank() {
        let stamps = builtin_stamps(Color32::RED);
        assert_eq!(stamps.len(), 3);
        for (_, image) in &stamps {
            assert!(image.pixels().any(|p| p.0[3] > 0));
        }
    }

    #[test]
    fn test_rotation_steps() {
        let mut tool = StampTool::new(1.0);
        tool.rotate(1.0, false);
        assert_eq!(tool.angle_degrees(), 15.0);
        tool.rotate(-3.0, true);
        assert_eq!(tool.angle_degrees(), 14.0);
        tool.rotate(-1.0, false);
        tool.rotate(-1.0, false);
        assert_eq!(tool.angle_degrees(), 344.0);
    }

    #[test]
    fn test_invalid_bytes_are_an_error() {
        assert!(matches!(load_stamp_bytes(b"not an image"), Err(StampError::Image(_))));
    }
}
