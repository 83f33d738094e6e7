//! Free-text search returning one representative record per code.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use snomed_model::{CatalogueEntry, Record, WorkingSet};

/// True when a query has nothing to search for.
///
/// Callers use this to tell "no query yet" apart from "no matches".
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Search display names and original texts, case-insensitively.
///
/// Returns the first matching entry per distinct code, in working-set order.
/// A blank query returns nothing.
pub fn search<'a>(set: &'a WorkingSet, query: &str) -> Vec<&'a CatalogueEntry> {
    if is_blank_query(query) {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut hits = Vec::new();
    for entry in set.entries() {
        let record = entry.record();
        if record.matches_text(&needle) && seen.insert(record.code()) {
            hits.push(entry);
        }
    }
    tracing::debug!(
        query_len = query.len(),
        scanned = set.len(),
        hits = hits.len(),
        "search complete"
    );
    hits
}

/// Registration ids and original texts of every record sharing one code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeUsage<'a> {
    /// Distinct registration ids, in first-seen order.
    pub registration_ids: Vec<&'a str>,
    /// Distinct original texts, in first-seen order.
    pub original_texts: Vec<&'a str>,
}

impl<'a> CodeUsage<'a> {
    fn add(&mut self, record: &'a Record, seen: &mut UsageSeen<'a>) {
        if seen.ids.insert(record.registration_id()) {
            self.registration_ids.push(record.registration_id());
        }
        if seen.texts.insert(record.original_text()) {
            self.original_texts.push(record.original_text());
        }
    }
}

#[derive(Default)]
struct UsageSeen<'a> {
    ids: HashSet<&'a str>,
    texts: HashSet<&'a str>,
}

/// Usage of a single code across the whole working set.
pub fn code_usage<'a>(set: &'a WorkingSet, code: &str) -> CodeUsage<'a> {
    let mut usage = CodeUsage::default();
    let mut seen = UsageSeen::default();
    for record in set.records().filter(|record| record.code() == code) {
        usage.add(record, &mut seen);
    }
    usage
}

/// A search result: the representative record and its code usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    #[serde(skip)]
    pub entry: &'a CatalogueEntry,
    pub record: &'a Record,
    pub usage: CodeUsage<'a>,
}

/// [`search`] plus the usage of every returned code, in one extra pass.
pub fn search_with_usage<'a>(set: &'a WorkingSet, query: &str) -> Vec<SearchHit<'a>> {
    let hits = search(set, query);
    if hits.is_empty() {
        return Vec::new();
    }

    let mut usages: HashMap<&'a str, (CodeUsage<'a>, UsageSeen<'a>)> = HashMap::new();
    for entry in hits.iter().copied() {
        usages.insert(entry.record().code(), Default::default());
    }
    for record in set.records() {
        if let Some((usage, seen)) = usages.get_mut(record.code()) {
            usage.add(record, seen);
        }
    }

    hits.into_iter()
        .map(|entry| SearchHit {
            entry,
            record: entry.record(),
            usage: usages
                .remove(entry.record().code())
                .map(|(usage, _)| usage)
                .unwrap_or_default(),
        })
        .collect()
}
