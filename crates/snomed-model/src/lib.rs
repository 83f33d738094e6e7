//! Clinical coding record model.
//!
//! Raw input coming from the baseline file or the overlay blob is coerced
//! into [`Record`] values by [`normalize`]. A [`WorkingSet`] concatenates the
//! two partitions and tags every entry with its [`Provenance`].

pub mod provenance;
pub mod raw;
pub mod record;
pub mod working_set;

pub use provenance::{OverlayHandle, Provenance};
pub use raw::{
    KEY_CATEGORY, KEY_CODE, KEY_DISPLAY_NAME, KEY_ORIGINAL_TEXT, KEY_REGISTRATION_ID, RawRecord,
    raw_records_from_value,
};
pub use record::{MISSING_MARKER, Record, RecordField, normalize};
pub use working_set::{CatalogueEntry, WorkingSet};
