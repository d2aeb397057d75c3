use std::sync::Arc;

use egui::{Color32, Pos2, Rect, pos2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use raster_paint::EditorContext;
use raster_paint::command::{
    AirbrushCommand, Command, EllipseCommand, EraserCommand, LineCommand, PaintBucketCommand, PolygonCommand,
    RectangleCommand, SelectionCommand, SelectionShape, StampCommand, UndoRedoManager, flood_fill, spray,
};
use raster_paint::config::EditorSettings;
use raster_paint::style::{Style, TraceType};
use raster_paint::surface::{CompositeMode, Surface, solid_image};

fn filled(color: Color32) -> Style {
    Style::new(color, 1.0).with_trace(TraceType::Filled)
}

fn context(width: u32, height: u32) -> EditorContext {
    EditorContext::new(EditorSettings {
        canvas_width: width,
        canvas_height: height,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_filled_rectangle_undo_redo() {
    let mut ctx = context(4, 4);
    ctx.commit(RectangleCommand::new(filled(Color32::RED)).with_corners(pos2(1.0, 1.0), pos2(2.0, 2.0)));
    assert_eq!(ctx.document.base().pixel(1, 1), Some(Color32::RED));
    assert_eq!(ctx.document.base().pixel(0, 0), Some(Color32::TRANSPARENT));

    assert!(ctx.undo());
    assert_eq!(ctx.document.base().pixel(1, 1), Some(Color32::TRANSPARENT));
    assert!(ctx.history.can_redo());

    assert!(ctx.redo());
    assert_eq!(ctx.document.base().pixel(1, 1), Some(Color32::RED));
    assert!(!ctx.history.can_redo());
}

#[test]
fn test_undo_redo_round_trip_restores_pixels() {
    let mut ctx = context(30, 30);
    let commands: Vec<Command> = vec![
        RectangleCommand::new(filled(Color32::RED))
            .with_corners(pos2(0.0, 0.0), pos2(10.0, 10.0))
            .into(),
        EllipseCommand::new(filled(Color32::BLUE))
            .with_corners(pos2(10.0, 10.0), pos2(25.0, 25.0))
            .into(),
        LineCommand::new(Style::new(Color32::GREEN, 3.0))
            .with_points(vec![pos2(0.0, 28.0), pos2(29.0, 28.0)])
            .into(),
    ];
    for command in commands {
        ctx.commit(command);
    }
    let drawn = ctx.document.base().to_image_data();

    while ctx.undo() {}
    assert!(ctx.document.base().to_image_data().pixels().all(|p| p.0[3] == 0));
    while ctx.redo() {}
    assert_eq!(ctx.document.base().to_image_data(), drawn);
}

#[test]
fn test_every_command_kind_survives_undo_redo() {
    let mut ctx = context(40, 40);

    let fill = flood_fill(&ctx.document.flatten(), pos2(39.0, 39.0), Color32::YELLOW, 0.0, true).unwrap();
    ctx.commit(PaintBucketCommand::new(pos2(39.0, 39.0), fill));
    ctx.commit(RectangleCommand::new(filled(Color32::RED)).with_corners(pos2(2.0, 2.0), pos2(12.0, 12.0)));
    ctx.commit(
        EllipseCommand::new(Style::new(Color32::BLUE, 2.0).with_trace(TraceType::FilledWithOutline))
            .with_corners(pos2(14.0, 2.0), pos2(26.0, 12.0)),
    );
    let mut line = LineCommand::new(Style::new(Color32::GREEN, 3.0))
        .with_points(vec![pos2(2.0, 20.0), pos2(12.0, 30.0), pos2(22.0, 20.0)]);
    line.set_junction(Some(5.0));
    ctx.commit(line);
    ctx.commit(
        PolygonCommand::new(filled(Color32::BLACK))
            .with_points(vec![pos2(26.0, 16.0), pos2(38.0, 16.0), pos2(32.0, 28.0)]),
    );
    ctx.commit(EraserCommand::new(4.0).with_points(vec![pos2(0.0, 36.0), pos2(39.0, 36.0)]));
    let droplets = spray(&mut StdRng::seed_from_u64(3), pos2(20.0, 20.0), 10.0, 50);
    ctx.commit(AirbrushCommand::new(Color32::DARK_RED, 2.0).with_droplets(droplets));
    let mut stamp = StampCommand::new(Arc::new(solid_image(6, 6, Color32::from_rgb(255, 0, 255))));
    stamp.set_center(pos2(34.0, 34.0));
    stamp.set_angle(30.0);
    stamp.set_scale(1.5);
    ctx.commit(stamp);
    let source = Rect::from_min_max(pos2(2.0, 2.0), pos2(12.0, 12.0));
    let mut selection = SelectionCommand::new(SelectionShape::Rectangle, ctx.document.background_color());
    selection.set_source(Some(source));
    selection.set_pixels(Some(Arc::new(ctx.document.base().get_image_data(source))));
    selection.set_destination(Some(Rect::from_min_max(pos2(5.0, 24.0), pos2(20.0, 39.0))));
    ctx.commit(selection);

    assert_eq!(ctx.history.undo_len(), 9);
    let drawn = ctx.document.base().to_image_data();

    while ctx.undo() {}
    assert!(ctx.document.base().to_image_data().pixels().all(|p| p.0[3] == 0));
    while ctx.redo() {}
    assert_eq!(ctx.history.undo_len(), 9);
    assert_eq!(ctx.document.base().to_image_data(), drawn);
}

#[test]
fn test_new_push_invalidates_redo() {
    let mut ctx = context(10, 10);
    ctx.commit(RectangleCommand::new(filled(Color32::RED)).with_corners(pos2(0.0, 0.0), pos2(5.0, 5.0)));
    ctx.undo();
    assert_eq!(ctx.history.redo_len(), 1);

    ctx.commit(RectangleCommand::new(filled(Color32::BLUE)).with_corners(pos2(5.0, 5.0), pos2(9.0, 9.0)));
    assert_eq!(ctx.history.redo_len(), 0);
    assert!(!ctx.redo());
}

#[test]
fn test_disabled_history_records_nothing() {
    let mut history = UndoRedoManager::new(10, 10);
    history.disable();
    let pushed = history.push(RectangleCommand::new(filled(Color32::RED)).into());
    assert!(!pushed);
    assert!(!history.can_undo());

    history.enable();
    assert!(history.push(RectangleCommand::new(filled(Color32::RED)).into()));
    assert_eq!(history.undo_len(), 1);
}

#[test]
fn test_bounded_history_keeps_folded_pixels() {
    let mut ctx = context(10, 10);
    ctx.history.set_max_history(2);
    for (i, color) in [Color32::RED, Color32::GREEN, Color32::BLUE].into_iter().enumerate() {
        let x = i as f32 * 3.0;
        ctx.commit(RectangleCommand::new(filled(color)).with_corners(pos2(x, 0.0), pos2(x + 2.0, 2.0)));
    }
    assert_eq!(ctx.history.undo_len(), 2);

    while ctx.undo() {}
    // The oldest command was folded into the baseline and survives.
    assert_eq!(ctx.document.base().pixel(1, 1), Some(Color32::RED));
    assert_eq!(ctx.document.base().pixel(4, 1), Some(Color32::TRANSPARENT));
}

#[test]
fn test_line_with_junctions() {
    let mut surface = Surface::new(20, 20).unwrap();
    let mut line = LineCommand::new(Style::new(Color32::RED, 2.0))
        .with_points(vec![pos2(2.0, 10.0), pos2(10.0, 10.0), pos2(10.0, 2.0)]);
    line.set_junction(Some(6.0));
    assert_eq!(line.segment_count(), 2);

    line.execute(&mut surface);
    assert_eq!(surface.pixel(6, 10), Some(Color32::RED));
    // Inside the junction circle but off the 2 px stroke.
    assert_eq!(surface.pixel(9, 11), Some(Color32::RED));
    assert_eq!(surface.pixel(18, 18), Some(Color32::TRANSPARENT));
}

#[test]
fn test_polygon_fills_interior() {
    let mut surface = Surface::new(20, 20).unwrap();
    PolygonCommand::new(filled(Color32::BLUE))
        .with_points(vec![pos2(0.0, 0.0), pos2(19.0, 0.0), pos2(0.0, 19.0)])
        .execute(&mut surface);
    assert_eq!(surface.pixel(3, 3), Some(Color32::BLUE));
    assert_eq!(surface.pixel(17, 17), Some(Color32::TRANSPARENT));
}

#[test]
fn test_outline_rectangle_leaves_inside_untouched() {
    let mut surface = Surface::new(20, 20).unwrap();
    RectangleCommand::new(Style::new(Color32::BLACK, 2.0))
        .with_corners(pos2(2.0, 2.0), pos2(18.0, 18.0))
        .execute(&mut surface);
    assert_eq!(surface.pixel(2, 10), Some(Color32::BLACK));
    assert_eq!(surface.pixel(10, 10), Some(Color32::TRANSPARENT));
}

#[test]
fn test_eraser_punches_through() {
    let mut surface = Surface::new(20, 20).unwrap();
    surface.fill(Color32::RED);
    EraserCommand::new(4.0)
        .with_points(vec![pos2(2.0, 10.0), pos2(18.0, 10.0)])
        .execute(&mut surface);
    assert_eq!(surface.pixel(10, 10), Some(Color32::TRANSPARENT));
    assert_eq!(surface.pixel(10, 2), Some(Color32::RED));
}

#[test]
fn test_airbrush_replays_identically() {
    let mut rng = StdRng::seed_from_u64(7);
    let droplets = spray(&mut rng, pos2(15.0, 15.0), 20.0, 200);
    let command = AirbrushCommand::new(Color32::RED, 2.0).with_droplets(droplets);

    let mut first = Surface::new(30, 30).unwrap();
    let mut second = Surface::new(30, 30).unwrap();
    command.execute(&mut first);
    command.execute(&mut second);
    assert_eq!(first.pixmap().data(), second.pixmap().data());
    assert!(first.to_image_data().pixels().any(|p| p.0[3] > 0));
}

#[test]
fn test_stamp_draws_centered_image() {
    let mut surface = Surface::new(20, 20).unwrap();
    let mut stamp = StampCommand::new(Arc::new(solid_image(4, 4, Color32::BLUE)));
    stamp.set_center(pos2(10.0, 10.0));
    assert_eq!(stamp.bounds(), Rect::from_min_max(pos2(8.0, 8.0), pos2(12.0, 12.0)));

    stamp.execute(&mut surface);
    assert_eq!(surface.pixel(9, 9), Some(Color32::BLUE));
    assert_eq!(surface.pixel(13, 13), Some(Color32::TRANSPARENT));
}

#[test]
fn test_flatten_puts_drawing_over_background() {
    let mut ctx = context(4, 4);
    ctx.document
        .base_mut()
        .fill_rect(Rect::from_min_max(Pos2::ZERO, pos2(2.0, 4.0)), Color32::RED, CompositeMode::SourceOver);
    let flat = ctx.document.flatten();
    assert_eq!(flat.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(flat.get_pixel(3, 0).0, [255, 255, 255, 255]);
}
