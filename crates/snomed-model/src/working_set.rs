//! The working set: baseline records followed by overlay records.
//!
//! A working set is built wholesale from both sources and never patched.
//! Each entry remembers its position and provenance so that views which
//! filter or reorder rows can still tell which rows are editable.

use crate::provenance::{OverlayHandle, Provenance};
use crate::raw::RawRecord;
use crate::record::{Record, normalize};

/// A record together with its position and origin in the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    index: usize,
    provenance: Provenance,
    record: Record,
}

impl CatalogueEntry {
    /// Position in the working set at build time.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn is_editable(&self) -> bool {
        self.provenance.is_editable()
    }
}

/// Immutable snapshot of `baseline ++ overlay`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    entries: Vec<CatalogueEntry>,
    baseline_len: usize,
    generation: u64,
}

impl WorkingSet {
    /// An empty working set (generation 0).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize both partitions and concatenate them.
    pub fn build(generation: u64, baseline: &[RawRecord], overlay: &[RawRecord]) -> Self {
        let mut entries = Vec::with_capacity(baseline.len() + overlay.len());
        for raw in baseline {
            entries.push(CatalogueEntry {
                index: entries.len(),
                provenance: Provenance::Baseline,
                record: normalize(raw),
            });
        }
        for (position, raw) in overlay.iter().enumerate() {
            entries.push(CatalogueEntry {
                index: entries.len(),
                provenance: Provenance::Overlay(OverlayHandle::new(generation, position)),
                record: normalize(raw),
            });
        }
        Self {
            entries,
            baseline_len: baseline.len(),
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn baseline_len(&self) -> usize {
        self.baseline_len
    }

    pub fn overlay_len(&self) -> usize {
        self.entries.len() - self.baseline_len
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogueEntry> {
        self.entries.get(index)
    }

    /// Records in working-set order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(CatalogueEntry::record)
    }

    /// Working-set index of an overlay handle minted by this generation.
    pub fn index_of(&self, handle: OverlayHandle) -> Option<usize> {
        if handle.generation() != self.generation || handle.position() >= self.overlay_len() {
            return None;
        }
        Some(self.baseline_len + handle.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_follows_partition() {
        let baseline = vec![RawRecord::new("1", "a", "", "", ""); 2];
        let overlay = vec![RawRecord::new("2", "b", "", "", "")];
        let set = WorkingSet::build(3, &baseline, &overlay);

        assert_eq!(set.len(), 3);
        assert_eq!(set.baseline_len(), 2);
        assert_eq!(set.overlay_len(), 1);
        assert!(!set.entries()[1].is_editable());
        let overlay_entry = &set.entries()[2];
        assert_eq!(overlay_entry.index(), 2);
        let handle = overlay_entry.provenance().handle().expect("overlay handle");
        assert_eq!(handle, OverlayHandle::new(3, 0));
        assert_eq!(set.index_of(handle), Some(2));
        assert_eq!(set.index_of(OverlayHandle::new(2, 0)), None);
    }
}
