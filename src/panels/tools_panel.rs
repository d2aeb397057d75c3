use egui::Slider;

use crate::PaintApp;
use crate::geometry::Anchor;
use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::input::ShellRequest;
use crate::style::TraceType;
use crate::tools::{Tool, ToolKind, load_stamp};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        app.handle_request(ShellRequest::NewDrawing);
                    }
                    if ui.button("Save").clicked() {
                        app.handle_request(ShellRequest::Save);
                    }
                    if ui.button("Gallery").clicked() {
                        app.handle_request(ShellRequest::OpenGallery);
                    }
                });
                ui.separator();

                ui.heading("Tools");
                let active = app.router.active_kind();
                for kind in ToolKind::ALL {
                    let label = format!("{} ({})", kind.label(), kind.shortcut().name());
                    if ui.selectable_label(active == kind, label).clicked() {
                        log::info!("Tool selected from UI: {}", kind.label());
                        app.set_tool(kind);
                    }
                }
                ui.separator();

                style_section(app, ui);
                ui.separator();
                tool_options(app, ui);
                ui.separator();
                grid_section(app, ui);
                ui.separator();
                history_section(app, ui);
            });
        });
}

fn style_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    let style = &mut app.editor.style;
    ui.heading("Style");
    ui.horizontal(|ui| {
        ui.color_edit_button_srgba(&mut style.primary_color);
        ui.color_edit_button_srgba(&mut style.secondary_color);
        if ui.button("Swap").clicked() {
            style.swap_colors();
        }
    });
    ui.add(Slider::new(&mut style.line_width, 1.0..=50.0).text("Width"));
    egui::ComboBox::from_label("Trace")
        .selected_text(style.trace.label())
        .show_ui(ui, |ui| {
            for trace in TraceType::ALL {
                ui.selectable_value(&mut style.trace, trace, trace.label());
            }
        });
}

fn tool_options(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.heading("Tool Options");
        ui.label(format!("(State: {})", app.router.tool().state_name()));
    });

    let settings = &mut app.editor.settings;
    match app.router.active_kind() {
        ToolKind::Eraser => {
            ui.add(Slider::new(&mut settings.eraser_size, 1.0..=100.0).text("Size"));
        }
        ToolKind::Airbrush => {
            ui.add(Slider::new(&mut settings.airbrush_emission_rate, 10.0..=2000.0).text("Droplets/s"));
            ui.add(Slider::new(&mut settings.airbrush_jet_diameter, 2.0..=200.0).text("Jet"));
            ui.add(Slider::new(&mut settings.airbrush_droplet_diameter, 1.0..=20.0).text("Droplet"));
        }
        ToolKind::PaintBucket => {
            ui.add(Slider::new(&mut settings.bucket_tolerance, 0.0..=100.0).text("Tolerance %"));
        }
        ToolKind::Line => {
            let mut junctions = settings.line_junction_diameter.is_some();
            ui.checkbox(&mut junctions, "Junctions");
            let mut diameter = settings.line_junction_diameter.unwrap_or(app.editor.style.line_width);
            if junctions {
                ui.add(Slider::new(&mut diameter, 1.0..=50.0).text("Diameter"));
            }
            settings.line_junction_diameter = junctions.then_some(diameter);
        }
        ToolKind::Stamp => {
            if ui
                .add(Slider::new(&mut settings.stamp_scale, 0.1..=5.0).text("Scale"))
                .changed()
            {
                let scale = settings.stamp_scale;
                if let Some(stamp) = app.router.tool_mut().as_stamp_tool_mut() {
                    stamp.set_scale(scale);
                }
            }
            stamp_library(app, ui);
        }
        _ => {}
    }
}

fn stamp_library(app: &mut PaintApp, ui: &mut egui::Ui) {
    let Some(stamp) = app.router.tool_mut().as_stamp_tool_mut() else {
        return;
    };
    ui.label(format!("Rotation: {:.0}°", stamp.angle_degrees()));
    let selected = stamp.selected();
    let mut choice = None;
    for (index, name) in stamp.stamp_names().into_iter().enumerate() {
        if ui.selectable_label(index == selected, name).clicked() {
            choice = Some(index);
        }
    }
    if let Some(index) = choice {
        stamp.select(index);
    }

    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.stamp_path);
        if ui.button("Load").clicked() {
            match load_stamp(&app.stamp_path) {
                Ok(image) => {
                    let name = std::path::Path::new(&app.stamp_path)
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "Custom".to_owned());
                    stamp.add_stamp(name, image);
                }
                Err(e) => log::warn!("{e}"),
            }
        }
    });
}

fn grid_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.heading("Grid");
    let grid = &mut app.editor.grid;
    let mut changed = ui.checkbox(&mut grid.visible, "Show grid (G)").changed();
    let mut size = grid.size();
    if ui
        .add(Slider::new(&mut size, MIN_GRID_SIZE..=MAX_GRID_SIZE).text("Size"))
        .changed()
    {
        grid.set_size(size);
        changed = true;
    }
    let mut opacity = grid.opacity();
    if ui.add(Slider::new(&mut opacity, 0.0..=1.0).text("Opacity")).changed() {
        grid.set_opacity(opacity);
        changed = true;
    }
    if changed {
        app.editor.refresh_grid();
    }

    let magnetism = &mut app.editor.magnetism;
    ui.checkbox(&mut magnetism.enabled, "Magnetism (M)");
    let current = magnetism.anchor();
    egui::ComboBox::from_label("Anchor")
        .selected_text(current.label())
        .show_ui(ui, |ui| {
            for anchor in Anchor::ALL {
                if ui.selectable_label(anchor == current, anchor.label()).clicked() {
                    magnetism.set_anchor(anchor);
                }
            }
        });
}

fn history_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_undo = app.editor.history.can_undo();
        let can_redo = app.editor.history.can_redo();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.redo();
        }
    });

    let history = &app.editor.history;
    ui.horizontal(|ui| {
        ui.label(format!("Undo stack size: {}", history.undo_len()));
        ui.label(format!("Redo stack size: {}", history.redo_len()));
    });

    egui::Grid::new("command_history_grid")
        .num_columns(2)
        .spacing([40.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Undo Stack");
            ui.strong("Redo Stack");
            ui.end_row();

            let undo_stack = history.undo_stack();
            let redo_stack = history.redo_stack();
            for i in 0..undo_stack.len().max(redo_stack.len()) {
                ui.label(undo_stack.get(i).map(|c| c.name()).unwrap_or(""));
                ui.label(redo_stack.get(i).map(|c| c.name()).unwrap_or(""));
                ui.end_row();
            }
        });
}
