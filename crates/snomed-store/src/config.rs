//! Catalogue location configuration.

use std::path::PathBuf;

use crate::blob::FileBlobStore;
use crate::catalogue::Catalogue;
use crate::overlay::{DEFAULT_OVERLAY_KEY, OverlayStore};
use crate::source::FileBaselineSource;

/// Environment variable for overriding the baseline file.
pub const DATA_FILE_ENV_VAR: &str = "SNOMED_DATA_FILE";

/// Environment variable for overriding the overlay directory.
pub const OVERLAY_DIR_ENV_VAR: &str = "SNOMED_OVERLAY_DIR";

/// Baseline file name used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Overlay directory used when nothing else is configured.
pub const DEFAULT_OVERLAY_DIR: &str = ".snomed";

/// A catalogue backed by files on disk.
pub type FileCatalogue = Catalogue<FileBaselineSource, FileBlobStore>;

/// Where the baseline and the overlay live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueConfig {
    /// Static JSON file holding the baseline dataset.
    pub data_file: PathBuf,
    /// Directory of the overlay blob store.
    pub overlay_dir: PathBuf,
    /// Blob key of the overlay.
    pub overlay_key: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            overlay_dir: PathBuf::from(DEFAULT_OVERLAY_DIR),
            overlay_key: DEFAULT_OVERLAY_KEY.to_string(),
        }
    }
}

impl CatalogueConfig {
    /// Defaults overridden by `SNOMED_DATA_FILE` and `SNOMED_OVERLAY_DIR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_file: std::env::var_os(DATA_FILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            overlay_dir: std::env::var_os(OVERLAY_DIR_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.overlay_dir),
            overlay_key: defaults.overlay_key,
        }
    }

    /// Override the baseline file when a value is given.
    #[must_use]
    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_file = path;
        }
        self
    }

    /// Override the overlay directory when a value is given.
    #[must_use]
    pub fn with_overlay_dir(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.overlay_dir = path;
        }
        self
    }

    /// Build an unloaded catalogue for this configuration.
    pub fn open(&self) -> FileCatalogue {
        Catalogue::new(
            FileBaselineSource::new(&self.data_file),
            OverlayStore::with_key(FileBlobStore::new(&self.overlay_dir), &self.overlay_key),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let config = CatalogueConfig::default()
            .with_data_file(Some(PathBuf::from("/tmp/base.json")))
            .with_overlay_dir(None);
        assert_eq!(config.data_file, PathBuf::from("/tmp/base.json"));
        assert_eq!(config.overlay_dir, PathBuf::from(DEFAULT_OVERLAY_DIR));
        assert_eq!(config.overlay_key, "snomedCustomData");
    }
}
