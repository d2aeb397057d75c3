use egui::{Color32, TextureHandle, TextureOptions, pos2};

use crate::PaintApp;
use crate::surface::Surface;

/// One texture per document surface, re-uploaded only when the surface changed.
#[derive(Default)]
pub struct CanvasTextures {
    layers: [Option<(TextureHandle, u64)>; 4],
}

impl std::fmt::Debug for CanvasTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let revisions: Vec<_> = self.layers.iter().map(|l| l.as_ref().map(|(_, r)| *r)).collect();
        f.debug_struct("CanvasTextures").field("revisions", &revisions).finish()
    }
}

const LAYER_NAMES: [&str; 4] = ["canvas_background", "canvas_base", "canvas_preview", "canvas_grid"];

impl CanvasTextures {
    fn texture(&mut self, ctx: &egui::Context, layer: usize, surface: &Surface) -> egui::TextureId {
        let slot = &mut self.layers[layer];
        match slot {
            Some((handle, revision)) if *revision == surface.revision() && handle.size() == surface_size(surface) => {}
            Some((handle, revision)) => {
                handle.set(surface.to_color_image(), TextureOptions::NEAREST);
                *revision = surface.revision();
            }
            None => {
                let handle = ctx.load_texture(LAYER_NAMES[layer], surface.to_color_image(), TextureOptions::NEAREST);
                *slot = Some((handle, surface.revision()));
            }
        }
        slot.as_ref().map(|(handle, _)| handle.id()).unwrap_or_default()
    }
}

fn surface_size(surface: &Surface) -> [usize; 2] {
    [surface.width() as usize, surface.height() as usize]
}

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::from_gray(0x40)))
        .show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let document = &app.editor.document;
                let (rect, _response) = ui.allocate_exact_size(document.size(), egui::Sense::click_and_drag());
                app.input.set_canvas_rect(rect);

                let uv = egui::Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                let layers = [document.background(), document.base(), document.preview(), document.grid()];
                for (index, surface) in layers.into_iter().enumerate() {
                    let id = app.textures.texture(ctx, index, surface);
                    ui.painter().image(id, rect, uv, Color32::WHITE);
                }
            });
        });
}
