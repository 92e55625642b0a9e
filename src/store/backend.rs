//! String-keyed blob storage backends.
//!
//! The store persists through this narrow repository interface so the
//! collection logic stays independent of where the blobs live: a data
//! directory in normal operation, an in-memory map in tests and
//! ephemeral serve mode.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::EtiquetaError;

/// String-keyed blob store. Keys are flat file-style names
/// (`labels.json`, `logo.txt`); values are opaque strings.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, EtiquetaError>;
    fn write(&self, key: &str, value: &str) -> Result<(), EtiquetaError>;
    fn remove(&self, key: &str) -> Result<(), EtiquetaError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, EtiquetaError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EtiquetaError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), EtiquetaError> {
        (**self).remove(key)
    }
}

/// Filesystem backend: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    /// Open (creating if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, EtiquetaError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            EtiquetaError::Storage(format!("cannot create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl Storage for FsStorage {
    fn read(&self, key: &str) -> Result<Option<String>, EtiquetaError> {
        let path = self.dir.join(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EtiquetaError::Storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EtiquetaError> {
        let path = self.dir.join(key);
        fs::write(&path, value).map_err(|e| {
            EtiquetaError::Storage(format!("cannot write {}: {}", path.display(), e))
        })
    }

    fn remove(&self, key: &str) -> Result<(), EtiquetaError> {
        let path = self.dir.join(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EtiquetaError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-memory backend. Cloning shares the underlying map, so a reloaded
/// store sees earlier writes — the same observable behavior as two
/// sessions against one data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, EtiquetaError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EtiquetaError> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EtiquetaError> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}
