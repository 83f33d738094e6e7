//! Working-set lifecycle.
//!
//! [`Catalogue`] owns the baseline source, the overlay store and the current
//! [`WorkingSet`]. Every mutation goes to the overlay and is followed by a
//! full rebuild; readers only ever see a complete working set.

use std::time::Instant;

use snomed_model::{CatalogueEntry, OverlayHandle, Provenance, RawRecord, WorkingSet};
use tracing::{info, info_span, warn};

use crate::blob::BlobStore;
use crate::error::{CatalogueError, Result};
use crate::overlay::OverlayStore;
use crate::source::BaselineSource;

pub struct Catalogue<S, B> {
    source: S,
    overlay: OverlayStore<B>,
    working: WorkingSet,
}

impl<S: BaselineSource, B: BlobStore> Catalogue<S, B> {
    /// Create a catalogue with an empty working set. Call [`Self::reload`]
    /// to populate it.
    pub fn new(source: S, overlay: OverlayStore<B>) -> Self {
        Self {
            source,
            overlay,
            working: WorkingSet::empty(),
        }
    }

    /// The working set visible to queries.
    pub fn current(&self) -> &WorkingSet {
        &self.working
    }

    pub fn overlay(&self) -> &OverlayStore<B> {
        &self.overlay
    }

    /// Rebuild the working set from the baseline and the overlay.
    ///
    /// On failure the previous working set stays visible.
    pub fn reload(&mut self) -> Result<&WorkingSet> {
        let span = info_span!("reload", generation = self.working.generation() + 1);
        let _guard = span.enter();
        let start = Instant::now();

        let baseline = self.source.fetch().inspect_err(|error| {
            warn!(error = %error, "baseline unavailable, keeping previous working set");
        })?;
        let overlay = self.overlay.load()?;

        self.working = WorkingSet::build(self.working.generation() + 1, &baseline, &overlay);
        info!(
            baseline_len = self.working.baseline_len(),
            overlay_len = self.working.overlay_len(),
            duration_ms = start.elapsed().as_millis(),
            "working set loaded"
        );
        Ok(&self.working)
    }

    /// Resolve a working-set index to an entry the caller may edit.
    pub fn authorize_edit(&self, index: usize) -> Result<&CatalogueEntry> {
        let entry = self
            .working
            .get(index)
            .ok_or(CatalogueError::NoSuchRecord { index })?;
        match entry.provenance() {
            Provenance::Overlay(_) => Ok(entry),
            Provenance::Baseline => Err(CatalogueError::EditUnauthorized { index }),
        }
    }

    /// Add a new record to the front of the overlay, then rebuild.
    pub fn append_overlay(&mut self, entry: RawRecord) -> Result<&WorkingSet> {
        self.overlay.append(entry)?;
        self.reload()
    }

    /// Replace the overlay record at a working-set index, then rebuild.
    ///
    /// Baseline indices are refused before the overlay is touched.
    pub fn replace_overlay(&mut self, index: usize, entry: RawRecord) -> Result<&WorkingSet> {
        self.authorize_edit(index)?;
        self.overlay.replace(self.working.len(), index, entry)?;
        self.reload()
    }

    /// Replace the overlay record behind a handle, then rebuild.
    pub fn edit(&mut self, handle: OverlayHandle, entry: RawRecord) -> Result<&WorkingSet> {
        let index =
            self.working
                .index_of(handle)
                .ok_or_else(|| CatalogueError::StaleHandle {
                    handle_generation: handle.generation(),
                    current_generation: self.working.generation(),
                })?;
        self.replace_overlay(index, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::source::StaticBaselineSource;

    const BASELINE: &str = r#"[
        {"No_Registrasi": "1", "Kategori": "person", "Kode_SNOMED": "339947000"},
        {"No_Registrasi": "2", "Kategori": "disorder", "Kode_SNOMED": "44054006"}
    ]"#;

    fn catalogue() -> Catalogue<StaticBaselineSource, MemoryBlobStore> {
        Catalogue::new(
            StaticBaselineSource::new("data.json", BASELINE),
            OverlayStore::new(MemoryBlobStore::new()),
        )
    }

    #[test]
    fn starts_empty_until_reload() {
        let mut catalogue = catalogue();
        assert!(catalogue.current().is_empty());
        let set = catalogue.reload().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.generation(), 1);
    }

    #[test]
    fn failed_first_reload_leaves_set_empty() {
        let mut catalogue = Catalogue::new(
            StaticBaselineSource::new("data.json", ""),
            OverlayStore::new(MemoryBlobStore::new()),
        );
        let error = catalogue.reload().unwrap_err();
        assert!(matches!(error, CatalogueError::Source(_)));
        assert!(catalogue.current().is_empty());
    }

    #[test]
    fn baseline_rows_are_not_editable() {
        let mut catalogue = catalogue();
        catalogue.reload().unwrap();

        let error = catalogue
            .replace_overlay(1, RawRecord::new("x", "", "", "", ""))
            .unwrap_err();
        assert!(matches!(error, CatalogueError::EditUnauthorized { index: 1 }));
        assert!(catalogue.overlay().load().unwrap().is_empty());
        assert!(matches!(
            catalogue.authorize_edit(7),
            Err(CatalogueError::NoSuchRecord { index: 7 })
        ));
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut catalogue = catalogue();
        catalogue.reload().unwrap();
        catalogue
            .append_overlay(RawRecord::new("9", "person", "", "", ""))
            .unwrap();
        let handle = catalogue.current().entries()[2]
            .provenance()
            .handle()
            .unwrap();
        catalogue
            .append_overlay(RawRecord::new("8", "person", "", "", ""))
            .unwrap();

        let error = catalogue
            .edit(handle, RawRecord::new("7", "person", "", "", ""))
            .unwrap_err();
        assert!(matches!(error, CatalogueError::StaleHandle { .. }));
    }
}
