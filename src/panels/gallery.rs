use uuid::Uuid;

use crate::PaintApp;
use crate::persistence::{DrawingRecord, filter_by_tags, parse_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryMode {
    #[default]
    Browse,
    Save,
}

/// State of the save / gallery window.
#[derive(Debug, Default)]
pub struct GalleryWindow {
    pub open: bool,
    pub mode: GalleryMode,
    name: String,
    tags: String,
    filter: String,
    records: Vec<DrawingRecord>,
    error: Option<String>,
}

impl GalleryWindow {
    pub fn open_save(&mut self) {
        self.open = true;
        self.mode = GalleryMode::Save;
        self.error = None;
    }

    pub fn open_browse(&mut self) {
        self.open = true;
        self.mode = GalleryMode::Browse;
        self.error = None;
    }

    pub fn set_records(&mut self, records: Vec<DrawingRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[DrawingRecord] {
        &self.records
    }
}

enum GalleryAction {
    Save { name: String, tags: Vec<String> },
    Open(Uuid),
    Delete(Uuid),
    Browse,
}

pub fn gallery_window(app: &mut PaintApp, ctx: &egui::Context) {
    if !app.gallery.open {
        return;
    }

    let mut open = true;
    let mut action = None;
    let gallery = &mut app.gallery;
    egui::Window::new("Gallery")
        .open(&mut open)
        .collapsible(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut gallery.mode, GalleryMode::Save, "Save");
                if ui
                    .selectable_value(&mut gallery.mode, GalleryMode::Browse, "Browse")
                    .clicked()
                {
                    action = Some(GalleryAction::Browse);
                }
            });
            ui.separator();

            match gallery.mode {
                GalleryMode::Save => {
                    egui::Grid::new("save_drawing_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut gallery.name);
                        ui.end_row();
                        ui.label("Tags");
                        ui.text_edit_singleline(&mut gallery.tags);
                        ui.end_row();
                    });
                    if ui.button("Save").clicked() {
                        action = Some(GalleryAction::Save {
                            name: gallery.name.trim().to_owned(),
                            tags: parse_tags(&gallery.tags),
                        });
                    }
                }
                GalleryMode::Browse => {
                    ui.horizontal(|ui| {
                        ui.label("Filter by tags");
                        ui.text_edit_singleline(&mut gallery.filter);
                    });
                    let filter = parse_tags(&gallery.filter);
                    egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                        egui::Grid::new("gallery_grid").num_columns(4).striped(true).show(ui, |ui| {
                            for record in filter_by_tags(&gallery.records, &filter) {
                                ui.label(&record.name);
                                ui.label(record.tags.join(" "));
                                if ui.small_button("Open").clicked() {
                                    action = Some(GalleryAction::Open(record.id));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some(GalleryAction::Delete(record.id));
                                }
                                ui.end_row();
                            }
                        });
                    });
                }
            }

            if let Some(error) = &gallery.error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
        });
    app.gallery.open = open;

    match action {
        Some(GalleryAction::Save { name, tags }) => match app.save_drawing(&name, tags) {
            Ok(_) => {
                app.gallery.error = None;
                app.gallery.open = false;
            }
            Err(e) => app.gallery.error = Some(e.to_string()),
        },
        Some(GalleryAction::Open(id)) => {
            app.open_drawing(&id);
            app.gallery.open = false;
        }
        Some(GalleryAction::Delete(id)) => app.delete_drawing(&id),
        Some(GalleryAction::Browse) => app.refresh_gallery(),
        None => {}
    }
}
