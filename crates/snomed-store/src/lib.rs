//! Storage side of the clinical coding catalogue.
//!
//! # Architecture
//!
//! - `source` - the read-only baseline dataset (static JSON file)
//! - `blob` - key-value blob storage (file-backed or in-memory)
//! - `overlay` - the user-editable overlay kept under one blob key
//! - `catalogue` - owns both and rebuilds the working set after each mutation
//! - `config` - file locations with environment overrides
//! - `error` - error types with user-facing messages

mod blob;
mod catalogue;
mod config;
mod error;
mod overlay;
mod source;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use catalogue::Catalogue;
pub use config::{
    CatalogueConfig, DATA_FILE_ENV_VAR, DEFAULT_DATA_FILE, DEFAULT_OVERLAY_DIR, FileCatalogue,
    OVERLAY_DIR_ENV_VAR,
};
pub use error::{CatalogueError, OverlayError, PersistenceError, Result, SourceError};
pub use overlay::{DEFAULT_OVERLAY_KEY, OverlayStore};
pub use source::{BaselineSource, FileBaselineSource, StaticBaselineSource, parse_baseline};
