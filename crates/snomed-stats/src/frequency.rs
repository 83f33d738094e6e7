//! Code-frequency table.

use std::collections::HashMap;

use serde::Serialize;
use snomed_model::{MISSING_MARKER, WorkingSet};

/// One `(code, display name)` group and its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRow {
    pub code: String,
    pub display_name: String,
    pub count: usize,
}

/// Count records per `(code, display name)`.
///
/// Records without a code, or with the `"N/A"` marker as code, are skipped.
/// Rows are ordered by count, highest first; equal counts keep first-seen
/// order.
pub fn frequency_table(set: &WorkingSet) -> Vec<FrequencyRow> {
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
    let mut rows: Vec<FrequencyRow> = Vec::new();

    for record in set.records() {
        let code = record.code();
        if code.is_empty() || code == MISSING_MARKER {
            continue;
        }
        let key = (code, record.display_name());
        match positions.get(&key) {
            Some(&position) => rows[position].count += 1,
            None => {
                positions.insert(key, rows.len());
                rows.push(FrequencyRow {
                    code: code.to_string(),
                    display_name: record.display_name().to_string(),
                    count: 1,
                });
            }
        }
    }

    rows.sort_by(|left, right| right.count.cmp(&left.count));
    tracing::debug!(groups = rows.len(), "frequency table computed");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use snomed_model::RawRecord;

    #[test]
    fn same_code_with_different_names_are_separate_groups() {
        let baseline = vec![
            RawRecord::new("1", "d", "", "44054006", "Diabetes mellitus type 2"),
            RawRecord::new("2", "d", "", "44054006", "Type 2 diabetes"),
            RawRecord::new("3", "d", "", "N/A", "Missing"),
        ];
        let set = WorkingSet::build(1, &baseline, &[]);
        let rows = frequency_table(&set);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.count == 1));
        assert_eq!(rows[0].display_name, "Diabetes mellitus type 2");
    }
}
