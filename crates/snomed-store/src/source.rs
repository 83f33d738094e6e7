//! Baseline dataset sources.

use std::fs;
use std::path::PathBuf;

use snomed_model::{RawRecord, raw_records_from_value};

use crate::error::SourceError;

/// A read-only provider of the baseline dataset.
pub trait BaselineSource {
    /// Fetch and parse the baseline. Called on every working-set rebuild.
    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// Baseline read from a static JSON file.
#[derive(Debug, Clone)]
pub struct FileBaselineSource {
    path: PathBuf,
}

impl FileBaselineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BaselineSource for FileBaselineSource {
    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let origin = self.path.display().to_string();
        let body = fs::read_to_string(&self.path).map_err(|source| SourceError::Unavailable {
            origin: origin.clone(),
            source,
        })?;
        parse_baseline(&body, &origin)
    }
}

/// Baseline served from an in-memory body.
#[derive(Debug, Clone)]
pub struct StaticBaselineSource {
    name: String,
    body: String,
}

impl StaticBaselineSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl BaselineSource for StaticBaselineSource {
    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        parse_baseline(&self.body, &self.name)
    }
}

/// Parse a baseline body.
///
/// Empty bodies, invalid JSON and non-array documents are distinct errors.
pub fn parse_baseline(body: &str, origin: &str) -> Result<Vec<RawRecord>, SourceError> {
    if body.is_empty() {
        return Err(SourceError::EmptyBody {
            origin: origin.to_string(),
        });
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|source| SourceError::InvalidJson {
            origin: origin.to_string(),
            source,
        })?;
    raw_records_from_value(value).ok_or_else(|| SourceError::NotAnArray {
        origin: origin.to_string(),
    })
}
