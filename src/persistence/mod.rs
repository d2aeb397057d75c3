//! Storage of finished drawings.
//!
//! A drawing is a [`DrawingRecord`] (id, name, tags, size) plus its flattened pixels.
//! The editor only needs three contracts from a backend: store a drawing by id,
//! fetch all records and delete by id. Failures are reported as
//! [`PersistenceError`] and never touch the undo history.

use thiserror::Error;
use uuid::Uuid;

use crate::document::Document;
use crate::surface::ImageData;

mod file_store;
mod memory_store;
mod record;

pub use file_store::FileDrawingStore;
pub use memory_store::MemoryDrawingStore;
pub use record::{DrawingRecord, filter_by_tags, parse_tags};

/// Errors that can occur while storing drawings
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to save drawing: {0}")]
    SaveFailed(String),

    #[error("Failed to delete drawing: {0}")]
    DeleteFailed(String),

    #[error("Failed to list drawings: {0}")]
    ListFailed(String),

    #[error("Failed to load drawing: {0}")]
    LoadFailed(String),

    #[error("Invalid drawing record: {0}")]
    InvalidRecord(String),

    #[error("No drawing with id {0}")]
    NotFound(DrawingId),
}

/// Identifier of a stored drawing.
pub type DrawingId = Uuid;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A place drawings are kept.
pub trait DrawingStore: Send + Sync {
    /// Stores `image` under `record.id`, replacing an existing drawing with that id.
    fn save(&self, record: &DrawingRecord, image: &ImageData) -> PersistenceResult<()>;

    /// All stored records, oldest first.
    fn list(&self) -> PersistenceResult<Vec<DrawingRecord>>;

    fn delete(&self, id: &DrawingId) -> PersistenceResult<()>;

    fn load(&self, id: &DrawingId) -> PersistenceResult<ImageData>;
}

/// Flattens `document` (drawing over background) and stores it as a new record.
pub fn save_document(
    store: &dyn DrawingStore,
    document: &Document,
    name: &str,
    tags: Vec<String>,
) -> PersistenceResult<DrawingRecord> {
    let record = DrawingRecord::new(name, tags, document.width(), document.height());
    record.validate()?;
    store.save(&record, &document.flatten())?;
    log::info!("Saved drawing '{}' ({})", record.name, record.id);
    Ok(record)
}
