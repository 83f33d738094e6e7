//! Store error types.
//!
//! Load failures carry user-facing messages and remediation hints so the
//! presentation layer can show them verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// Baseline dataset could not be turned into records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be read at all.
    #[error("failed to read baseline {origin}: {source}")]
    Unavailable {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but contained nothing.
    #[error("baseline {origin} is empty")]
    EmptyBody { origin: String },

    /// The body is not valid JSON.
    #[error("baseline {origin} is not valid JSON: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose top level is not an array.
    #[error("baseline {origin} must be a JSON array")]
    NotAnArray { origin: String },
}

impl SourceError {
    pub fn origin(&self) -> &str {
        match self {
            Self::Unavailable { origin, .. }
            | Self::EmptyBody { origin }
            | Self::InvalidJson { origin, .. }
            | Self::NotAnArray { origin } => origin,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable { origin, source } => {
                format!("Failed to load data file {origin}: {source}.")
            }
            Self::EmptyBody { origin } => format!("The data file {origin} is empty."),
            Self::InvalidJson { origin, .. } => {
                format!("The data file {origin} could not be parsed as JSON.")
            }
            Self::NotAnArray { origin } => format!(
                "The data file {origin} has an invalid format. The data must be an array [...]."
            ),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Unavailable { origin, .. } => Some(format!(
                "Make sure {origin} exists and is readable, or point --data at the right file."
            )),
            Self::EmptyBody { .. } | Self::NotAnArray { .. } => Some(
                "The file must contain a JSON array of records, e.g. [{\"Kode_SNOMED\": \"...\"}]."
                    .into(),
            ),
            Self::InvalidJson { .. } => Some("Check the file for syntax errors.".into()),
        }
    }
}

/// Blob store operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the storage medium.
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    /// Serialization error.
    #[error("Failed to serialize overlay data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

/// Overlay mutation error.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The working-set index does not resolve into the overlay partition.
    #[error(
        "index {index} does not resolve to an overlay record \
         (baseline {baseline_len}, overlay {overlay_len})"
    )]
    IndexOutOfRange {
        index: usize,
        baseline_len: usize,
        overlay_len: usize,
    },
}

/// Catalogue operation error.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Baseline records are read-only.
    #[error("record {index} comes from the baseline dataset and cannot be edited")]
    EditUnauthorized { index: usize },

    /// No record at this working-set index.
    #[error("no record at index {index}")]
    NoSuchRecord { index: usize },

    /// The handle belongs to a working set that has since been rebuilt.
    #[error("overlay handle is stale (generation {handle_generation}, current {current_generation})")]
    StaleHandle {
        handle_generation: u64,
        current_generation: u64,
    },
}

impl From<PersistenceError> for CatalogueError {
    fn from(error: PersistenceError) -> Self {
        Self::Overlay(OverlayError::Persistence(error))
    }
}

impl CatalogueError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Source(error) => error.user_message(),
            Self::Overlay(OverlayError::Persistence(_)) => {
                "Your changes could not be saved.".to_string()
            }
            Self::Overlay(OverlayError::IndexOutOfRange { index, .. }) => {
                format!("Record {index} is no longer part of your own entries; nothing was changed.")
            }
            Self::EditUnauthorized { .. } => {
                "Sorry, records from the original data file cannot be edited.".to_string()
            }
            Self::NoSuchRecord { index } => format!("There is no record number {index}."),
            Self::StaleHandle { .. } => {
                "The data changed since this record was opened; reload and try again.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Source(error) => error.suggestion(),
            Self::Overlay(OverlayError::Persistence(_)) => {
                Some("Check that the overlay directory is writable.".into())
            }
            Self::Overlay(OverlayError::IndexOutOfRange { .. }) | Self::NoSuchRecord { .. } => {
                Some("List the records with `table` to find the current index.".into())
            }
            Self::EditUnauthorized { .. } => {
                Some("Add a new record with `add` instead.".into())
            }
            Self::StaleHandle { .. } => None,
        }
    }
}

/// Result type alias for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;
