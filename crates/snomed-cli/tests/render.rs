//! Rendering of search cards, gender summaries and tables.

use snomed_cli::render::{
    NOT_EDITABLE, format_gender_summary, format_search_results, frequency_table, records_table,
};
use snomed_model::{RawRecord, RecordField, WorkingSet};
use snomed_query::{SortSpec, TableQuery, project, search_with_usage};
use snomed_stats::GenderStats;

fn working_set() -> WorkingSet {
    let baseline = vec![
        RawRecord::new("1001", "disorder", "DM type 2", "44054006", "Diabetes mellitus type 2"),
        RawRecord::new("1002", "disorder", "diabetes", "44054006", "Diabetes mellitus type 2"),
        RawRecord::new("1001", "finding", "high bp", "38341003", "Hypertensive disorder"),
    ];
    let overlay = vec![RawRecord::new("2001", "person", "man", "339947000", "Male")];
    WorkingSet::build(1, &baseline, &overlay)
}

#[test]
fn search_cards_list_patients_and_texts_per_code() {
    let set = working_set();
    let hits = search_with_usage(&set, "diab");
    let text = format_search_results("diab", &hits);
    insta::assert_snapshot!(text, @r"
    Found 1 related code.

    SNOMED CT code: 44054006
      FSN:           Diabetes mellitus type 2
      Category:      disorder
      Patients:      1001, 1002
      Original text: DM type 2 | diabetes
    ");
}

#[test]
fn blank_query_prompts_instead_of_counting() {
    let set = working_set();
    let hits = search_with_usage(&set, "   ");
    assert_eq!(
        format_search_results("   ", &hits),
        "Enter a search term to start.\n"
    );
}

#[test]
fn zero_matches_are_reported() {
    let set = working_set();
    let hits = search_with_usage(&set, "asthma");
    insta::assert_snapshot!(format_search_results("asthma", &hits), @r"
    No results for this search term.
    Found 0 related codes.
    ");
}

#[test]
fn gender_summary_shows_shares() {
    let stats = GenderStats {
        primary_count: 1,
        secondary_count: 2,
    };
    insta::assert_snapshot!(format_gender_summary(&stats), @r"
    Patient gender (3 patients):
      Male:       1 (33.3%)
      Female:     2 (66.7%)
    ");
}

#[test]
fn gender_summary_without_data() {
    assert_eq!(
        format_gender_summary(&GenderStats::default()),
        "Patient gender: no records coded as man or woman were found.\n"
    );
}

#[test]
fn records_table_marks_only_overlay_rows_as_editable() {
    let set = working_set();
    let sort = Some(SortSpec::descending(RecordField::RegistrationId));
    let rows = project(&set, &TableQuery::new().with_sort(sort));
    let rendered = records_table(&rows, sort).to_string();

    assert!(rendered.contains("#3"), "{rendered}");
    assert_eq!(rendered.matches(NOT_EDITABLE).count(), 3, "{rendered}");
    assert!(rendered.contains("Registration ▼"), "{rendered}");
}

#[test]
fn frequency_table_lists_every_group() {
    let set = working_set();
    let rows = snomed_stats::frequency_table(&set);
    let rendered = frequency_table(&rows).to_string();
    for code in ["44054006", "38341003", "339947000"] {
        assert!(rendered.contains(code), "{rendered}");
    }
}
