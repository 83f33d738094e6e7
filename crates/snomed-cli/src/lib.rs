//! CLI library components for the SNOMED CT coding catalogue.

pub mod logging;
pub mod render;
