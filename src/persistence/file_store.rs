use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{DrawingRecord, DrawingStore, PersistenceError, PersistenceResult};
use crate::surface::ImageData;

const INDEX_FILE: &str = "index.json";

/// Drawings kept in a directory: `index.json` lists the records, each drawing's
/// pixels are in `<id>.png`.
#[derive(Debug, Clone)]
pub struct FileDrawingStore {
    dir: PathBuf,
}

impl FileDrawingStore {
    /// The directory is created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn image_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{id}.png"))
    }

    fn read_index(&self) -> Result<Vec<DrawingRecord>, String> {
        match fs::read_to_string(self.index_path()) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| e.to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn write_index(&self, records: &[DrawingRecord]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(records).map_err(|e| e.to_string())?;
        fs::write(self.index_path(), json).map_err(|e| e.to_string())
    }
}

impl DrawingStore for FileDrawingStore {
    fn save(&self, record: &DrawingRecord, image: &ImageData) -> PersistenceResult<()> {
        record.validate()?;
        fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;
        image
            .save_with_format(self.image_path(&record.id), image::ImageFormat::Png)
            .map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;

        let mut records = self.read_index().map_err(PersistenceError::SaveFailed)?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_index(&records).map_err(PersistenceError::SaveFailed)?;
        log::debug!("Wrote {} to {}", record.id, self.dir.display());
        Ok(())
    }

    fn list(&self) -> PersistenceResult<Vec<DrawingRecord>> {
        self.read_index().map_err(PersistenceError::ListFailed)
    }

    fn delete(&self, id: &Uuid) -> PersistenceResult<()> {
        let mut records = self.read_index().map_err(PersistenceError::DeleteFailed)?;
        let position = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or(PersistenceError::NotFound(*id))?;
        records.remove(position);

        match fs::remove_file(self.image_path(id)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => log::warn!("Image of drawing {id} was already gone"),
            Err(e) => return Err(PersistenceError::DeleteFailed(e.to_string())),
        }
        self.write_index(&records).map_err(PersistenceError::DeleteFailed)
    }

    fn load(&self, id: &Uuid) -> PersistenceResult<ImageData> {
        let records = self.read_index().map_err(PersistenceError::LoadFailed)?;
        if !records.iter().any(|r| &r.id == id) {
            return Err(PersistenceError::NotFound(*id));
        }
        let image = image::open(self.image_path(id)).map_err(|e| PersistenceError::LoadFailed(e.to_string()))?;
        Ok(image.to_rgba8())
    }
}
