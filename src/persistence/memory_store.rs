use parking_lot::Mutex;
use uuid::Uuid;

use super::{DrawingRecord, DrawingStore, PersistenceError, PersistenceResult};
use crate::surface::ImageData;

#[derive(Debug, Default)]
struct Inner {
    drawings: Vec<(DrawingRecord, ImageData)>,
    failing: bool,
}

/// In-process store. It can be switched into a failing mode where every call
/// errors, to exercise the editor's failure paths.
#[derive(Debug, Default)]
pub struct MemoryDrawingStore {
    inner: Mutex<Inner>,
}

impl MemoryDrawingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DrawingStore for MemoryDrawingStore {
    fn save(&self, record: &DrawingRecord, image: &ImageData) -> PersistenceResult<()> {
        record.validate()?;
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(PersistenceError::SaveFailed("store unavailable".to_owned()));
        }
        let entry = (record.clone(), image.clone());
        match inner.drawings.iter_mut().find(|(r, _)| r.id == record.id) {
            Some(existing) => *existing = entry,
            None => inner.drawings.push(entry),
        }
        Ok(())
    }

    fn list(&self) -> PersistenceResult<Vec<DrawingRecord>> {
        let inner = self.inner.lock();
        if inner.failing {
            return Err(PersistenceError::ListFailed("store unavailable".to_owned()));
        }
        Ok(inner.drawings.iter().map(|(record, _)| record.clone()).collect())
    }

    fn delete(&self, id: &Uuid) -> PersistenceResult<()> {
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(PersistenceError::DeleteFailed("store unavailable".to_owned()));
        }
        let position = inner
            .drawings
            .iter()
            .position(|(r, _)| &r.id == id)
            .ok_or(PersistenceError::NotFound(*id))?;
        inner.drawings.remove(position);
        Ok(())
    }

    fn load(&self, id: &Uuid) -> PersistenceResult<ImageData> {
        let inner = self.inner.lock();
        if inner.failing {
            return Err(PersistenceError::LoadFailed("store unavailable".to_owned()));
        }
        inner
            .drawings
            .iter()
            .find(|(r, _)| &r.id == id)
            .map(|(_, image)| image.clone())
            .ok_or(PersistenceError::NotFound(*id))
    }
}
