//! Note store contract and JSON blob implementation.
//!
//! # Responsibility
//! - Provide whole-collection CRUD over a single serialized blob file.
//! - Absorb medium failures into empty reads and no-op writes.
//!
//! # Invariants
//! - `save` upserts by id: replace in place when present, append otherwise.
//! - `delete` of an unknown id leaves the stored collection unchanged.
//! - Read and write paths never panic and never return errors; failures are
//!   reported on the diagnostic log channel only.

use crate::model::note::{Note, NoteId};
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Namespaced blob file holding the full note collection.
pub const NOTES_FILE_NAME: &str = "briefnote_notes.json";

const DATA_DIR_ENV: &str = "BRIEFNOTE_DATA_DIR";
const DEFAULT_DATA_DIR_NAME: &str = "briefnote";

/// Whole-collection persistence contract for notes.
///
/// All operations are synchronous; the caller is the single-threaded owner
/// of the collection and no locking happens at this layer.
pub trait NoteStore {
    /// Returns the full collection in stored order.
    fn list(&self) -> Vec<Note>;
    /// Upserts one note by id: replace when present, append otherwise.
    fn save(&self, note: &Note);
    /// Removes the matching note when present; no-op otherwise.
    fn delete(&self, id: NoteId);
    /// Returns one note by id.
    fn get_by_id(&self, id: NoteId) -> Option<Note>;
}

/// File-backed note store serializing the collection as one JSON blob.
///
/// A store without a usable blob path is "detached": it reads an empty
/// collection and silently drops writes, mirroring how the collection
/// behaves when the persistence medium does not exist at all.
pub struct JsonNoteStore {
    blob_path: Option<PathBuf>,
}

impl JsonNoteStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Side effects
    /// - Creates the data directory on first use.
    /// - Emits a `store_open` diagnostic event.
    ///
    /// Falls back to a detached store when the directory cannot be prepared.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        if let Err(err) = fs::create_dir_all(dir) {
            warn!(
                "event=store_open module=store status=error dir={} error={err}",
                dir.display()
            );
            return Self::detached();
        }

        let blob_path = dir.join(NOTES_FILE_NAME);
        info!(
            "event=store_open module=store status=ok blob={}",
            blob_path.display()
        );
        Self {
            blob_path: Some(blob_path),
        }
    }

    /// Creates a store with no persistence medium behind it.
    ///
    /// Reads return an empty collection and writes are no-ops, by contract.
    pub fn detached() -> Self {
        Self { blob_path: None }
    }

    /// Opens a store at the configured data directory.
    ///
    /// Resolution order: `BRIEFNOTE_DATA_DIR` when set and non-blank, then a
    /// per-user default under the OS temp directory.
    pub fn open_default() -> Self {
        Self::open(resolve_data_dir())
    }

    /// Returns whether this store has a persistence medium.
    pub fn is_detached(&self) -> bool {
        self.blob_path.is_none()
    }

    /// Returns the blob path when the store is attached.
    pub fn blob_path(&self) -> Option<&Path> {
        self.blob_path.as_deref()
    }

    fn read_all(&self) -> Vec<Note> {
        let Some(path) = self.blob_path.as_deref() else {
            return Vec::new();
        };

        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error blob={} error={err}",
                    path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Note>>(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error blob={} error_code=blob_decode_failed error={err}",
                    path.display()
                );
                Vec::new()
            }
        }
    }

    fn write_all(&self, notes: &[Note]) {
        let Some(path) = self.blob_path.as_deref() else {
            return;
        };

        let raw = match serde_json::to_vec(notes) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=store_write module=store status=error blob={} error_code=blob_encode_failed error={err}",
                    path.display()
                );
                return;
            }
        };

        if let Err(err) = fs::write(path, raw) {
            warn!(
                "event=store_write module=store status=error blob={} error={err}",
                path.display()
            );
        }
    }
}

impl NoteStore for JsonNoteStore {
    fn list(&self) -> Vec<Note> {
        self.read_all()
    }

    fn save(&self, note: &Note) {
        let mut notes = self.read_all();
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
        self.write_all(&notes);
    }

    fn delete(&self, id: NoteId) {
        let mut notes = self.read_all();
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() != before {
            self.write_all(&notes);
        }
    }

    fn get_by_id(&self, id: NoteId) -> Option<Note> {
        self.read_all().into_iter().find(|note| note.id == id)
    }
}

/// Resolves the data directory for default store construction.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME)
}
