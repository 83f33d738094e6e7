//! Query engine over a [`snomed_model::WorkingSet`].
//!
//! Two independent modes:
//! - [`search`]: substring search over display names and original texts,
//!   one representative record per code
//! - [`project`]: category filter, full-record text filter and a stable
//!   column sort for table views

pub mod search;
pub mod table;

pub use search::{CodeUsage, SearchHit, code_usage, is_blank_query, search, search_with_usage};
pub use table::{SortDirection, SortSpec, SortState, TableQuery, categories, project};
