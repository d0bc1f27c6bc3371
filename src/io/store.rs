//! Where document text is read from and written back to

use crate::error::{Result, TubeMatterError};
use crate::io::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Whole-document storage
///
/// Documents are always read and written as complete texts.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Documents on the local filesystem, written atomically
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl DocumentStore for FileStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write_atomic(path, content)
    }
}

/// Documents held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.lock_documents().insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock_documents().get(path).cloned()
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_documents(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| TubeMatterError::file_not_found(path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.insert(path, content);
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new().with_document("a.md", "hello");
        assert_eq!(store.read(Path::new("a.md")).unwrap(), "hello");
        assert!(store.read(Path::new("b.md")).is_err());

        store.write(Path::new("a.md"), "bye").unwrap();
        assert_eq!(store.get(Path::new("a.md")).as_deref(), Some("bye"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.md");
        FileStore.write(&path, "content").unwrap();
        assert_eq!(FileStore.read(&path).unwrap(), "content");
    }
}
