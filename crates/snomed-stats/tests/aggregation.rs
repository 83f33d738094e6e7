//! Tests for gender counts and the code-frequency table.

use std::collections::HashSet;

use proptest::prelude::*;
use snomed_model::{RawRecord, WorkingSet};
use snomed_stats::{
    FrequencyRow, GenderCodes, GenderStats, frequency_table, gender_stats, gender_stats_with,
};

fn person(reg: &str, code: &str) -> RawRecord {
    RawRecord::new(reg, "person", "", code, "")
}

fn row(code: &str, name: &str, count: usize) -> FrequencyRow {
    FrequencyRow {
        code: code.to_string(),
        display_name: name.to_string(),
        count,
    }
}

#[test]
fn first_classification_wins() {
    let set = WorkingSet::build(
        1,
        &[person("1", "339947000"), person("1", "224526002")],
        &[],
    );
    assert_eq!(
        gender_stats(&set),
        GenderStats {
            primary_count: 1,
            secondary_count: 0
        }
    );
}

#[test]
fn unclassified_records_do_not_claim_the_id() {
    let set = WorkingSet::build(
        1,
        &[
            person("1", "73211009"),
            person("1", "248152002"),
            person("2", "224526002"),
            RawRecord::new("3", "PERSON", "", "339947000", ""),
            RawRecord::new("4", "finding", "", "339947000", ""),
        ],
        &[person("5", "339947000")],
    );
    let stats = gender_stats(&set);
    assert_eq!(stats.primary_count, 2);
    assert_eq!(stats.secondary_count, 2);
    assert_eq!(stats.total(), 4);
}

#[test]
fn custom_codes_are_honoured() {
    let codes = GenderCodes {
        category: "Demographic".to_string(),
        primary: vec!["M".to_string()],
        secondary: vec!["F".to_string()],
    };
    let set = WorkingSet::build(
        1,
        &[
            RawRecord::new("1", "demographic", "", "F", ""),
            RawRecord::new("2", "demographic", "", "M", ""),
            RawRecord::new("3", "person", "", "M", ""),
        ],
        &[],
    );
    let stats = gender_stats_with(&set, &codes);
    assert_eq!((stats.primary_count, stats.secondary_count), (1, 1));
}

#[test]
fn empty_set_has_no_stats() {
    let set = WorkingSet::empty();
    assert_eq!(gender_stats(&set), GenderStats::default());
    assert!(frequency_table(&set).is_empty());
}

#[test]
fn frequency_orders_by_count() {
    let mut baseline = vec![RawRecord::new("1", "d", "", "44054006", "Diabetes mellitus type 2 (disorder)")];
    for reg in ["2", "3", "4"] {
        baseline.push(RawRecord::new(reg, "d", "", "73211009", "Diabetes mellitus (disorder)"));
    }
    baseline.push(RawRecord::new("5", "d", "", "", "No code"));
    baseline.push(RawRecord::new("6", "d", "", "N/A", "Marker"));
    let set = WorkingSet::build(1, &baseline, &[]);

    assert_eq!(
        frequency_table(&set),
        vec![
            row("73211009", "Diabetes mellitus (disorder)", 3),
            row("44054006", "Diabetes mellitus type 2 (disorder)", 1),
        ]
    );
}

#[test]
fn frequency_ties_keep_first_seen_order() {
    let set = WorkingSet::build(
        1,
        &[
            RawRecord::new("1", "d", "", "B", "b"),
            RawRecord::new("1", "d", "", "A", "a"),
            RawRecord::new("1", "d", "", "C", "c"),
            RawRecord::new("1", "d", "", "C", "c"),
        ],
        &[RawRecord::new("1", "d", "", "D", "d")],
    );
    let codes: Vec<String> = frequency_table(&set).into_iter().map(|r| r.code).collect();
    assert_eq!(codes, vec!["C", "B", "A", "D"]);
}

fn arb_raw() -> impl Strategy<Value = RawRecord> {
    (
        "[1-6]",
        prop_oneof![Just("person"), Just("PERSON"), Just("finding")],
        prop_oneof![
            Just("339947000"),
            Just("224526002"),
            Just("248152002"),
            Just("73211009"),
            Just("N/A"),
            Just(""),
        ],
        prop_oneof![Just("x"), Just("y")],
    )
        .prop_map(|(reg, cat, code, name)| RawRecord::new(reg, cat, "", code, name))
}

proptest! {
    #[test]
    fn never_double_counts(records in prop::collection::vec(arb_raw(), 0..24)) {
        let set = WorkingSet::build(1, &records, &[]);
        let stats = gender_stats(&set);
        let eligible: HashSet<&str> = set
            .records()
            .filter(|r| r.category().eq_ignore_ascii_case("person"))
            .map(|r| r.registration_id())
            .collect();
        prop_assert!(stats.total() <= eligible.len());
    }

    #[test]
    fn frequency_sums_to_eligible_records(records in prop::collection::vec(arb_raw(), 0..24)) {
        let set = WorkingSet::build(1, &records, &[]);
        let rows = frequency_table(&set);
        let eligible = set
            .records()
            .filter(|r| !r.code().is_empty() && r.code() != "N/A")
            .count();
        prop_assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), eligible);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }
}
