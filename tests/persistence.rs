use std::path::PathBuf;

use egui::{Color32, pos2};
use raster_paint::EditorContext;
use raster_paint::command::RectangleCommand;
use raster_paint::config::EditorSettings;
use raster_paint::persistence::{
    DrawingRecord, DrawingStore, FileDrawingStore, MemoryDrawingStore, PersistenceError, filter_by_tags,
    save_document,
};
use raster_paint::style::{Style, TraceType};
use raster_paint::surface::solid_image;
use uuid::Uuid;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("raster_paint_test_{}", Uuid::new_v4()))
}

fn context() -> EditorContext {
    EditorContext::new(EditorSettings {
        canvas_width: 8,
        canvas_height: 6,
        ..Default::default()
    })
    .unwrap()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_file_store_save_list_load_delete() {
    let dir = scratch_dir();
    let store = FileDrawingStore::new(&dir);
    assert!(store.list().unwrap().is_empty());

    let record = DrawingRecord::new("Sunset", tags(&["sky", "orange"]), 3, 2);
    let image = solid_image(3, 2, Color32::from_rgb(250, 120, 0));
    store.save(&record, &image).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed, vec![record.clone()]);
    assert_eq!(store.load(&record.id).unwrap(), image);

    // Reopening the directory sees the same drawings.
    let reopened = FileDrawingStore::new(&dir);
    assert_eq!(reopened.list().unwrap().len(), 1);

    store.delete(&record.id).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(store.delete(&record.id), Err(PersistenceError::NotFound(id)) if id == record.id));
    assert!(matches!(store.load(&record.id), Err(PersistenceError::NotFound(_))));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_file_store_rejects_invalid_record() {
    let dir = scratch_dir();
    let store = FileDrawingStore::new(&dir);
    let record = DrawingRecord::new("   ", Vec::new(), 3, 2);
    let result = store.save(&record, &solid_image(3, 2, Color32::WHITE));
    assert!(matches!(result, Err(PersistenceError::InvalidRecord(_))));
    assert!(!dir.exists());
}

#[test]
fn test_memory_store_failing_mode() {
    let store = MemoryDrawingStore::new();
    let record = DrawingRecord::new("Doodle", Vec::new(), 1, 1);
    store.save(&record, &solid_image(1, 1, Color32::BLACK)).unwrap();

    store.set_failing(true);
    assert!(matches!(
        store.save(&record, &solid_image(1, 1, Color32::BLACK)),
        Err(PersistenceError::SaveFailed(_))
    ));
    assert!(matches!(store.list(), Err(PersistenceError::ListFailed(_))));
    assert!(matches!(store.delete(&record.id), Err(PersistenceError::DeleteFailed(_))));
    assert!(matches!(store.load(&record.id), Err(PersistenceError::LoadFailed(_))));

    store.set_failing(false);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_save_document_stores_flattened_pixels() {
    let mut ctx = context();
    let style = Style::new(Color32::RED, 1.0).with_trace(TraceType::Filled);
    ctx.commit(RectangleCommand::new(style).with_corners(pos2(0.0, 0.0), pos2(2.0, 2.0)));

    let store = MemoryDrawingStore::new();
    let record = save_document(&store, &ctx.document, "Red corner", tags(&["red"])).unwrap();
    assert_eq!((record.width, record.height), (8, 6));

    let image = store.load(&record.id).unwrap();
    assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    // Transparent areas come out as the background.
    assert_eq!(image.get_pixel(7, 5).0, [255, 255, 255, 255]);
}

#[test]
fn test_failed_save_keeps_history() {
    let mut ctx = context();
    let style = Style::new(Color32::BLUE, 1.0).with_trace(TraceType::Filled);
    ctx.commit(RectangleCommand::new(style).with_corners(pos2(1.0, 1.0), pos2(4.0, 4.0)));

    let store = MemoryDrawingStore::new();
    store.set_failing(true);
    let result = save_document(&store, &ctx.document, "Blue", Vec::new());
    assert!(matches!(result, Err(PersistenceError::SaveFailed(_))));

    assert_eq!(ctx.history.undo_len(), 1);
    assert!(ctx.undo());
    assert!(ctx.redo());
    assert_eq!(ctx.document.base().pixel(2, 2), Some(Color32::BLUE));
}

#[test]
fn test_open_drawing_starts_fresh_history() {
    let mut ctx = context();
    let style = Style::new(Color32::RED, 1.0).with_trace(TraceType::Filled);
    ctx.commit(RectangleCommand::new(style).with_corners(pos2(0.0, 0.0), pos2(3.0, 3.0)));

    let stored = solid_image(5, 4, Color32::GREEN);
    ctx.open_drawing(&stored).unwrap();
    assert_eq!(ctx.document.width(), 5);
    assert!(!ctx.history.can_undo());
    assert_eq!(ctx.document.base().pixel(4, 3), Some(Color32::GREEN));

    ctx.commit(RectangleCommand::new(style).with_corners(pos2(0.0, 0.0), pos2(1.0, 1.0)));
    assert!(ctx.undo());
    assert_eq!(ctx.document.base().pixel(0, 0), Some(Color32::GREEN));
}

#[test]
fn test_tag_filtering_over_listed_records() {
    let store = MemoryDrawingStore::new();
    for (name, record_tags) in [("a", vec!["cat", "sketch"]), ("b", vec!["cat"]), ("c", vec!["dog"])] {
        let record = DrawingRecord::new(name, tags(&record_tags), 1, 1);
        store.save(&record, &solid_image(1, 1, Color32::WHITE)).unwrap();
    }
    let records = store.list().unwrap();

    let cats: Vec<_> = filter_by_tags(&records, &tags(&["CAT"])).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(cats, vec!["a", "b"]);
    assert_eq!(filter_by_tags(&records, &tags(&["cat", "sketch"])).len(), 1);
    assert_eq!(filter_by_tags(&records, &[]).len(), 3);
}
