use uuid::Uuid;

use crate::config::EditorSettings;
use crate::error::SurfaceError;
use crate::event::{DocumentEvent, EditorEvent, EventRecorder, LoggingEventHandler, SelectionEvent};
use crate::input::{InputHandler, InputRouter, ShellRequest};
use crate::panels::{CanvasTextures, GalleryWindow};
use crate::persistence::{self, DrawingStore, PersistenceError};
use crate::state::EditorContext;
use crate::tools::{Tool, ToolKind};

pub struct PaintApp {
    pub(crate) editor: EditorContext,
    pub(crate) router: InputRouter,
    pub(crate) input: InputHandler,
    pub(crate) textures: CanvasTextures,
    pub(crate) gallery: GalleryWindow,
    pub(crate) store: Box<dyn DrawingStore>,
    /// Path typed into the stamp loader
    pub(crate) stamp_path: String,
    events: EventRecorder,
    status: String,
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("editor", &self.editor)
            .field("router", &self.router)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, SurfaceError> {
        let mut settings: EditorSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        settings.validate();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: EditorSettings) -> Result<Self, SurfaceError> {
        let store = default_store(&settings);
        let mut editor = EditorContext::new(settings)?;
        let events = EventRecorder::new();
        editor.event_bus.subscribe(Box::new(LoggingEventHandler));
        editor.event_bus.subscribe(Box::new(events.clone()));
        let router = InputRouter::new(ToolKind::Pencil, &mut editor);

        Ok(Self {
            editor,
            router,
            input: InputHandler::new(),
            textures: CanvasTextures::default(),
            gallery: GalleryWindow::default(),
            store,
            stamp_path: String::new(),
            events,
            status: String::from("Ready"),
        })
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.router.set_tool(kind, &mut self.editor);
    }

    pub fn undo(&mut self) {
        self.router.undo(&mut self.editor);
    }

    pub fn redo(&mut self) {
        self.router.redo(&mut self.editor);
    }

    /// Current settings, including what was changed from the panels.
    pub fn current_settings(&self) -> EditorSettings {
        let mut settings = self.editor.settings.clone();
        settings.style = self.editor.style;
        settings.grid_size = self.editor.grid.size();
        settings.grid_opacity = self.editor.grid.opacity();
        settings.show_grid = self.editor.grid.visible;
        settings.magnetism = self.editor.magnetism.enabled;
        settings
    }

    pub(crate) fn handle_request(&mut self, request: ShellRequest) {
        match request {
            ShellRequest::Save => self.gallery.open_save(),
            ShellRequest::OpenGallery => {
                self.gallery.open_browse();
                self.refresh_gallery();
            }
            ShellRequest::NewDrawing => {
                let (width, height) = (self.editor.settings.canvas_width, self.editor.settings.canvas_height);
                self.new_drawing(width, height);
            }
        }
    }

    pub fn new_drawing(&mut self, width: u32, height: u32) {
        self.router.tool_mut().cancel(&mut self.editor);
        if let Err(e) = self.editor.new_drawing(width, height) {
            log::warn!("{e}");
            self.status = e.to_string();
        }
    }

    pub(crate) fn refresh_gallery(&mut self) {
        match self.store.list() {
            Ok(records) => self.gallery.set_records(records),
            Err(e) => {
                log::warn!("{e}");
                self.status = e.to_string();
            }
        }
    }

    /// Stores the flattened drawing. Failures are reported and leave the history alone.
    pub fn save_drawing(&mut self, name: &str, tags: Vec<String>) -> Result<Uuid, PersistenceError> {
        // A floating selection is part of what the user sees.
        if let Some(selection) = self.router.tool_mut().as_selection_tool_mut() {
            selection.commit_selection(&mut self.editor);
        }
        match persistence::save_document(self.store.as_ref(), &self.editor.document, name, tags) {
            Ok(record) => {
                self.editor.emit(EditorEvent::DocumentChanged(DocumentEvent::Saved { id: record.id }));
                Ok(record.id)
            }
            Err(e) => {
                self.editor.emit(EditorEvent::DocumentChanged(DocumentEvent::SaveFailed {
                    message: e.to_string(),
                }));
                Err(e)
            }
        }
    }

    pub fn open_drawing(&mut self, id: &Uuid) {
        let image = match self.store.load(id) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("{e}");
                self.status = e.to_string();
                return;
            }
        };
        self.router.tool_mut().cancel(&mut self.editor);
        match self.editor.open_drawing(&image) {
            Ok(()) => self.editor.emit(EditorEvent::DocumentChanged(DocumentEvent::Opened { id: *id })),
            Err(e) => self.status = e.to_string(),
        }
    }

    pub fn delete_drawing(&mut self, id: &Uuid) {
        let event = match self.store.delete(id) {
            Ok(()) => DocumentEvent::Deleted { id: *id },
            Err(e) => DocumentEvent::DeleteFailed { message: e.to_string() },
        };
        self.editor.emit(EditorEvent::DocumentChanged(event));
        self.refresh_gallery();
    }

    /// Turns this frame's editor events into the status line.
    fn update_status(&mut self) {
        for event in self.events.take() {
            let status = match event {
                EditorEvent::ToolChanged { new, .. } => format!("{} selected", new.label()),
                EditorEvent::CommandCommitted { name } => format!("{name} drawn"),
                EditorEvent::ColorPicked { color, primary } => {
                    let which = if primary { "Primary" } else { "Secondary" };
                    let [r, g, b, _] = color.to_srgba_unmultiplied();
                    format!("{which} colour set to #{r:02x}{g:02x}{b:02x}")
                }
                EditorEvent::SelectionChanged(SelectionEvent::Deleted) => "Selection deleted".to_owned(),
                EditorEvent::ClipboardChanged => "Copied to clipboard".to_owned(),
                EditorEvent::DocumentChanged(event) => match event {
                    DocumentEvent::Created { width, height } => format!("New {width}x{height} drawing"),
                    DocumentEvent::Opened { id } => format!("Opened {id}"),
                    DocumentEvent::Saved { id } => format!("Saved {id}"),
                    DocumentEvent::Deleted { id } => format!("Deleted {id}"),
                    DocumentEvent::SaveFailed { message } | DocumentEvent::DeleteFailed { message } => message,
                },
                _ => continue,
            };
            self.status = status;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store(settings: &EditorSettings) -> Box<dyn DrawingStore> {
    Box::new(persistence::FileDrawingStore::new(settings.storage_dir.clone()))
}

#[cfg(target_arch = "wasm32")]
fn default_store(_settings: &EditorSettings) -> Box<dyn DrawingStore> {
    Box::new(persistence::MemoryDrawingStore::new())
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.current_settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Input is routed against last frame's canvas rect so the canvas below shows
        // its effect in this frame.
        for event in self.input.process_input(ctx) {
            if let Some(request) = self.router.handle(&event, &mut self.editor) {
                self.handle_request(request);
            }
        }
        let now = ctx.input(|i| i.time);
        self.router.tick(now, &mut self.editor);
        if self.router.wants_ticks() {
            ctx.request_repaint();
        }

        crate::panels::tools_panel(self, ctx);
        crate::panels::gallery_window(self, ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.separator();
                ui.label(format!(
                    "{} ({})",
                    self.router.tool().name(),
                    self.router.tool().state_name()
                ));
            });
        });

        crate::panels::central_panel(self, ctx);

        self.update_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use egui::{Color32, Key, Modifiers, Rect, pos2};

    #[test]
    fn test_save_commits_floating_selection() {
        let storage_dir = std::env::temp_dir().join(format!("raster_paint_app_{}", Uuid::new_v4()));
        let mut app = PaintApp::with_settings(EditorSettings {
            canvas_width: 10,
            canvas_height: 10,
            storage_dir: storage_dir.clone(),
            ..Default::default()
        })
        .unwrap();
        app.editor.document.base_mut().fill_rect(
            Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 2.0)),
            Color32::RED,
            crate::surface::CompositeMode::SourceOver,
        );

        app.set_tool(ToolKind::RectangleSelection);
        if let Some(selection) = app.router.tool_mut().as_selection_tool_mut() {
            selection.select_all(&mut app.editor);
        }
        let nudge = InputEvent::KeyDown {
            key: Key::ArrowRight,
            modifiers: Modifiers::NONE,
            repeat: false,
            time: 0.0,
        };
        app.router.handle(&nudge, &mut app.editor);

        let id = app.save_drawing("Nudged", Vec::new()).unwrap();
        assert_eq!(app.router.tool().state_name(), "Idle");
        assert_eq!(app.editor.history.undo_len(), 1);

        let image = app.store.load(&id).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(3, 0).0, [255, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(storage_dir);
    }
}
