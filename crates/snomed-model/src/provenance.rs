#![deny(unsafe_code)]

/// Stable reference to an overlay entry within one working-set generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle {
    generation: u64,
    position: usize,
}

impl OverlayHandle {
    pub const fn new(generation: u64, position: usize) -> Self {
        Self {
            generation,
            position,
        }
    }

    /// Working-set generation that minted this handle.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Position within the overlay list (0 = most recent).
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// Where a working-set record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Read-only baseline dataset.
    Baseline,
    /// User-entered overlay.
    Overlay(OverlayHandle),
}

impl Provenance {
    /// Only overlay records may be edited.
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Overlay(_))
    }

    pub const fn handle(&self) -> Option<OverlayHandle> {
        match self {
            Self::Overlay(handle) => Some(*handle),
            Self::Baseline => None,
        }
    }
}
