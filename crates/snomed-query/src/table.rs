//! Filtered, searched and sorted tabular projection of the working set.
//!
//! Rows keep a reference to their [`CatalogueEntry`], so the original
//! working-set index and the provenance survive any filter or sort. A row
//! is editable iff it came from the overlay.

use std::cmp::Ordering;
use std::collections::HashSet;

use snomed_model::{CatalogueEntry, RecordField, WorkingSet};

/// Sort direction of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// A column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(field: RecordField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn descending(field: RecordField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Column-header sort state.
///
/// Selecting the sorted column again flips its direction; selecting another
/// column sorts it ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<SortSpec>,
}

impl SortState {
    pub fn current(&self) -> Option<SortSpec> {
        self.current
    }

    pub fn toggle(&mut self, field: RecordField) -> SortSpec {
        let next = match self.current {
            Some(spec) if spec.field == field => SortSpec {
                field,
                direction: spec.direction.reversed(),
            },
            _ => SortSpec::ascending(field),
        };
        self.current = Some(next);
        next
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Parameters of a table projection. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// Keep only rows whose category equals this value exactly.
    pub category: Option<String>,
    /// Keep only rows where some field contains this text, ignoring case.
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }
}

/// Project the working set into table rows.
///
/// Filtering keeps the working-set order; sorting is stable and compares
/// lowercase field values, so ties keep their filtered order.
pub fn project<'a>(set: &'a WorkingSet, query: &TableQuery) -> Vec<&'a CatalogueEntry> {
    let category = query.category.as_deref().filter(|value| !value.is_empty());
    let needle = query
        .search
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase);

    let rows: Vec<&CatalogueEntry> = set
        .entries()
        .iter()
        .filter(|entry| category.is_none_or(|category| entry.record().category() == category))
        .filter(|entry| {
            needle
                .as_deref()
                .is_none_or(|needle| entry.record().matches_any_field(needle))
        })
        .collect();

    let rows = match query.sort {
        Some(spec) => sort_rows(rows, spec),
        None => rows,
    };
    tracing::debug!(
        total = set.len(),
        rows = rows.len(),
        sorted = query.sort.is_some(),
        "table projected"
    );
    rows
}

fn sort_rows(rows: Vec<&CatalogueEntry>, spec: SortSpec) -> Vec<&CatalogueEntry> {
    let mut keyed: Vec<(String, &CatalogueEntry)> = rows
        .into_iter()
        .map(|entry| (entry.record().field_lower(spec.field).into_owned(), entry))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| compare(left, right, spec.direction));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

fn compare(left: &str, right: &str, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => left.cmp(right),
        SortDirection::Descending => right.cmp(left),
    }
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(set: &WorkingSet) -> Vec<&str> {
    let mut seen = HashSet::new();
    set.records()
        .map(|record| record.category())
        .filter(|category| !category.is_empty() && seen.insert(*category))
        .collect()
}
