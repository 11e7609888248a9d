use std::collections::HashMap;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::ARCHIVE_KEY;
use crate::error::{PersistenceError, PersistenceResult};
use crate::stroke::LineSegment;

/// Snapshot of the drawing state that survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    pub segments: Vec<LineSegment>,
    pub ink_color: Color32,
    pub background_color: Color32,
    pub pen_size: f32,
    pub eraser_size: f32,
}

impl Archive {
    pub fn to_json(&self) -> PersistenceResult<String> {
        serde_json::to_string(self).map_err(PersistenceError::Serialize)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        serde_json::from_str(json).map_err(PersistenceError::Deserialize)
    }
}

/// Write the archive under [`ARCHIVE_KEY`], replacing whatever was there.
///
/// Flushing to disk is left to eframe's autosave and shutdown path.
pub fn store_archive(storage: &mut dyn eframe::Storage, archive: &Archive) -> PersistenceResult<()> {
    let json = archive.to_json()?;
    storage.set_string(ARCHIVE_KEY, json);
    log::debug!("Stored archive with {} segments", archive.segments.len());
    Ok(())
}

/// Read the archive back, failing if it is missing or unreadable.
pub fn read_archive(storage: &dyn eframe::Storage) -> PersistenceResult<Archive> {
    let json = storage
        .get_string(ARCHIVE_KEY)
        .ok_or(PersistenceError::MissingArchive(ARCHIVE_KEY))?;
    Archive::from_json(&json)
}

/// Like [`read_archive`], but any failure is logged and treated as "no saved state".
pub fn load_archive(storage: &dyn eframe::Storage) -> Option<Archive> {
    match read_archive(storage) {
        Ok(archive) => {
            log::info!("Restored archive with {} segments", archive.segments.len());
            Some(archive)
        }
        Err(PersistenceError::MissingArchive(_)) => {
            log::info!("No saved sketch found, starting empty");
            None
        }
        Err(err) => {
            log::warn!("Ignoring saved sketch: {}", err);
            None
        }
    }
}

/// [`eframe::Storage`] backed by a map that lives as long as the value.
/// Nothing is written to disk, which makes it the storage of choice in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}
