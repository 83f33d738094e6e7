//! The user-editable overlay partition.
//!
//! The overlay is a JSON array stored under one key of a [`BlobStore`]. It
//! is never cached here: every mutation reads the blob, changes it and
//! writes it back, and every rebuild reads it again.

use snomed_model::{RawRecord, raw_records_from_value};

use crate::blob::BlobStore;
use crate::error::{OverlayError, PersistenceError};

/// Default blob key of the overlay.
pub const DEFAULT_OVERLAY_KEY: &str = "snomedCustomData";

/// Owns the overlay blob. Baseline records never pass through here.
#[derive(Debug, Clone)]
pub struct OverlayStore<B> {
    blob: B,
    key: String,
}

impl<B: BlobStore> OverlayStore<B> {
    pub fn new(blob: B) -> Self {
        Self::with_key(blob, DEFAULT_OVERLAY_KEY)
    }

    pub fn with_key(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// Read the overlay, most recent entry first.
    ///
    /// An absent or corrupt blob is an empty overlay.
    pub fn load(&self) -> Result<Vec<RawRecord>, PersistenceError> {
        let Some(text) = self.blob.get(&self.key)? else {
            return Ok(Vec::new());
        };
        Ok(parse_overlay(&text, &self.key))
    }

    /// Insert an entry at the front and persist.
    pub fn append(&mut self, entry: RawRecord) -> Result<(), PersistenceError> {
        let mut entries = self.load()?;
        entries.insert(0, entry);
        self.persist(&entries)?;
        tracing::info!(overlay_len = entries.len(), "appended overlay entry");
        Ok(())
    }

    /// Replace the overlay entry behind a working-set index and persist.
    ///
    /// `working_set_len` is the length of the working set the index was
    /// taken from. The baseline length is derived from it and the current
    /// overlay length. Provenance authorization is the caller's job; this
    /// only checks that the index lands inside the overlay.
    pub fn replace(
        &mut self,
        working_set_len: usize,
        working_set_index: usize,
        entry: RawRecord,
    ) -> Result<(), OverlayError> {
        let mut entries = self.load()?;
        let overlay_len = entries.len();
        let baseline_len = working_set_len.saturating_sub(overlay_len);
        let out_of_range = || OverlayError::IndexOutOfRange {
            index: working_set_index,
            baseline_len,
            overlay_len,
        };
        if working_set_len < overlay_len {
            return Err(out_of_range());
        }
        let overlay_index = working_set_index
            .checked_sub(baseline_len)
            .filter(|position| *position < overlay_len)
            .ok_or_else(out_of_range)?;

        entries[overlay_index] = entry;
        self.persist(&entries)?;
        tracing::info!(overlay_index, overlay_len, "replaced overlay entry");
        Ok(())
    }

    fn persist(&mut self, entries: &[RawRecord]) -> Result<(), PersistenceError> {
        let text = serde_json::to_string(entries)
            .map_err(|source| PersistenceError::Serialization { source })?;
        self.blob.set(&self.key, &text)
    }
}

fn parse_overlay(text: &str, key: &str) -> Vec<RawRecord> {
    if text.is_empty() {
        return Vec::new();
    }
    let parsed = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(raw_records_from_value);
    match parsed {
        Some(entries) => entries,
        None => {
            tracing::warn!(key, "overlay blob is corrupt, treating it as empty");
            Vec::new()
        }
    }
}
