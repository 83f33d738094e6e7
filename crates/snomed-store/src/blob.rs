//! Key-value blob storage for the overlay.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::PersistenceError;

type Result<T> = std::result::Result<T, PersistenceError>;

/// A named-blob store. Values are opaque text.
pub trait BlobStore {
    /// Read a blob. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a blob, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Blob store backed by a map. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through [`BlobStore::set`].
    pub fn with_blob(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), value.into());
        self
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(PersistenceError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    /// Bytes that are not UTF-8 are decoded lossily; the caller sees text it
    /// cannot parse rather than an I/O failure.
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8(bytes).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), "blob is not valid UTF-8");
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }))),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source,
            }),
        }
    }

    /// Uses atomic write (temp file + rename) so a crash never leaves a
    /// half-written blob behind.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.root).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(value.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote blob");
        Ok(())
    }
}
