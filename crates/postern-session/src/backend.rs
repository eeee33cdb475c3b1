//! Storage backends for the session table.
//!
//! The table persists as one JSON document and every save replaces the
//! whole document. [`FileBackend`] is the production backend;
//! [`MemoryBackend`] backs tests and short-lived embedders.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::record::SessionTable;

/// Trait for table storage backends.
///
/// The store calls `load` at the start of every operation and `save` when
/// the operation changed something, always under its own lock.
///
/// `load` is deliberately infallible: a table that is missing, unreadable,
/// or unparsable loads as empty, so the store starts clean on first run
/// and recovers from corruption by itself. Save failures do surface,
/// because losing a write is something callers need to know about.
pub trait TableBackend: Send + Sync {
    /// Read the table as currently persisted.
    fn load(&self) -> SessionTable;

    /// Persist the table, replacing any prior contents.
    fn save(&self, table: &SessionTable) -> Result<()>;
}

impl<B: TableBackend + ?Sized> TableBackend for Arc<B> {
    fn load(&self) -> SessionTable {
        (**self).load()
    }

    fn save(&self, table: &SessionTable) -> Result<()> {
        (**self).save(table)
    }
}

/// File-backed table storage.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file the table persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl TableBackend for FileBackend {
    fn load(&self) -> SessionTable {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session table on disk, starting empty");
                return SessionTable::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session table, treating as empty");
                return SessionTable::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(table) => table,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Session table unparsable, treating as empty");
                SessionTable::new()
            }
        }
    }

    fn save(&self, table: &SessionTable) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(table)?;

        // Write-then-rename: the persisted file only ever holds a complete
        // document, never a torn write.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        trace!(path = %self.path.display(), sessions = table.len(), "Session table saved");
        Ok(())
    }
}

/// In-memory table storage, for tests and ephemeral embedders.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    table: Mutex<SessionTable>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the table currently held.
    pub fn snapshot(&self) -> SessionTable {
        self.table.lock().clone()
    }

    /// Replace the held table wholesale.
    pub fn replace(&self, table: SessionTable) {
        *self.table.lock() = table;
    }
}

impl TableBackend for MemoryBackend {
    fn load(&self) -> SessionTable {
        self.table.lock().clone()
    }

    fn save(&self, table: &SessionTable) -> Result<()> {
        *self.table.lock() = table.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SessionRecord;

    fn temp_backend() -> (tempfile::TempDir, FileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("sessions.json"));
        (dir, backend)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, backend) = temp_backend();
        assert!(backend.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, backend) = temp_backend();

        let mut table = SessionTable::new();
        table.insert("abc", SessionRecord::new("10.0.0.1", 1_000));
        backend.save(&table).unwrap();

        let loaded = backend.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("abc"), table.get("abc"));
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let (_dir, backend) = temp_backend();

        let mut first = SessionTable::new();
        first.insert("abc", SessionRecord::new("10.0.0.1", 1));
        first.insert("def", SessionRecord::new("10.0.0.2", 2));
        backend.save(&first).unwrap();

        let mut second = SessionTable::new();
        second.insert("ghi", SessionRecord::new("10.0.0.3", 3));
        backend.save(&second).unwrap();

        let loaded = backend.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("ghi"));
        assert!(!loaded.contains("abc"));
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("a/b/sessions.json"));

        backend.save(&SessionTable::new()).unwrap();
        assert!(backend.path().exists());
    }

    #[test]
    fn test_load_garbage_is_empty() {
        let (_dir, backend) = temp_backend();
        std::fs::write(backend.path(), "not json at all {{{").unwrap();

        assert!(backend.load().is_empty());
    }

    #[test]
    fn test_load_malformed_record_is_empty() {
        let (_dir, backend) = temp_backend();
        // Valid JSON, but the record is missing fields: the whole table
        // is rejected rather than partially accepted.
        std::fs::write(backend.path(), r#"{"abc":{"created":5}}"#).unwrap();

        assert!(backend.load().is_empty());
    }

    #[test]
    fn test_recovers_after_corruption() {
        let (_dir, backend) = temp_backend();
        std::fs::write(backend.path(), "garbage").unwrap();

        let mut table = backend.load();
        assert!(table.is_empty());

        table.insert("abc", SessionRecord::new("10.0.0.1", 1_000));
        backend.save(&table).unwrap();
        assert_eq!(backend.load().len(), 1);
    }

    #[test]
    fn test_memory_backend_round_trips() {
        let backend = MemoryBackend::new();
        assert!(backend.load().is_empty());

        let mut table = SessionTable::new();
        table.insert("abc", SessionRecord::new("10.0.0.1", 1_000));
        backend.save(&table).unwrap();

        assert_eq!(backend.snapshot().len(), 1);
        assert!(backend.load().contains("abc"));
    }
}
