//! Patient gender counts from `person` records.
//!
//! Each registration id is counted once. The first record of an id whose
//! code falls in either code set decides its class; later records for that
//! id are skipped.

use std::collections::HashSet;

use serde::Serialize;
use snomed_model::WorkingSet;

/// Category whose records carry gender findings.
pub const PERSON_CATEGORY: &str = "person";

/// Male (finding).
pub const MALE_CODES: &[&str] = &["339947000"];

/// Woman (person), Female (finding).
pub const FEMALE_CODES: &[&str] = &["224526002", "248152002"];

/// Which records are eligible and how their codes are classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderCodes {
    /// Compared case-insensitively against the record category.
    pub category: String,
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl Default for GenderCodes {
    fn default() -> Self {
        Self {
            category: PERSON_CATEGORY.to_string(),
            primary: MALE_CODES.iter().map(|code| (*code).to_string()).collect(),
            secondary: FEMALE_CODES.iter().map(|code| (*code).to_string()).collect(),
        }
    }
}

/// Counts of distinct patients per class. Primary is male, secondary female
/// with the default codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderStats {
    pub primary_count: usize,
    pub secondary_count: usize,
}

impl GenderStats {
    pub fn total(&self) -> usize {
        self.primary_count + self.secondary_count
    }

    /// Shares in percent, rounded to one decimal. `None` when nothing was
    /// counted.
    pub fn percentages(&self) -> Option<(f64, f64)> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let share = |count: usize| (count as f64 / total as f64 * 1000.0).round() / 10.0;
        Some((share(self.primary_count), share(self.secondary_count)))
    }
}

/// Gender counts with the default `person` category and codes.
pub fn gender_stats(set: &WorkingSet) -> GenderStats {
    gender_stats_with(set, &GenderCodes::default())
}

pub fn gender_stats_with(set: &WorkingSet, codes: &GenderCodes) -> GenderStats {
    let mut stats = GenderStats::default();
    let mut counted: HashSet<&str> = HashSet::new();
    let category = codes.category.to_lowercase();

    for record in set
        .records()
        .filter(|record| record.category().to_lowercase() == category)
    {
        let registration_id = record.registration_id();
        if counted.contains(registration_id) {
            continue;
        }
        let code = record.code();
        if codes.primary.iter().any(|candidate| candidate == code) {
            stats.primary_count += 1;
            counted.insert(registration_id);
        } else if codes.secondary.iter().any(|candidate| candidate == code) {
            stats.secondary_count += 1;
            counted.insert(registration_id);
        }
    }

    tracing::debug!(
        primary = stats.primary_count,
        secondary = stats.secondary_count,
        "gender stats computed"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_to_one_decimal() {
        let stats = GenderStats {
            primary_count: 1,
            secondary_count: 2,
        };
        assert_eq!(stats.percentages(), Some((33.3, 66.7)));
        assert_eq!(GenderStats::default().percentages(), None);
    }
}
