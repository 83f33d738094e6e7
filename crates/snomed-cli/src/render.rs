//! Text and table rendering for CLI output.
//!
//! Plain-text output (search cards, gender summary) is built as `String`s so
//! it can be snapshot-tested; tabular output goes through `comfy-table`.

use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use snomed_model::{CatalogueEntry, RecordField};
use snomed_query::{SearchHit, SortDirection, SortSpec};
use snomed_stats::{FrequencyRow, GenderStats};

/// Shown in the action column of rows that cannot be edited.
pub const NOT_EDITABLE: &str = "—";

const RECORD_COLUMNS: [RecordField; 5] = [
    RecordField::RegistrationId,
    RecordField::Category,
    RecordField::OriginalText,
    RecordField::Code,
    RecordField::DisplayName,
];

/// One card per code, preceded by the result count.
///
/// A blank query yields the prompt to start searching instead of a count.
pub fn format_search_results(query: &str, hits: &[SearchHit<'_>]) -> String {
    let mut out = String::new();
    if snomed_query::is_blank_query(query) {
        out.push_str("Enter a search term to start.\n");
        return out;
    }
    if hits.is_empty() {
        out.push_str("No results for this search term.\n");
    }
    let _ = writeln!(out, "Found {} related {}.", hits.len(), plural(hits.len(), "code"));
    for hit in hits {
        let record = hit.record;
        out.push('\n');
        let _ = writeln!(out, "SNOMED CT code: {}", record.code());
        let _ = writeln!(out, "  FSN:           {}", record.display_name());
        let _ = writeln!(out, "  Category:      {}", record.category());
        let _ = writeln!(
            out,
            "  Patients:      {}",
            hit.usage.registration_ids.join(", ")
        );
        let _ = writeln!(
            out,
            "  Original text: {}",
            hit.usage.original_texts.join(" | ")
        );
    }
    out
}

/// Gender counts with their shares, or the no-data notice.
pub fn format_gender_summary(stats: &GenderStats) -> String {
    match stats.percentages() {
        None => "Patient gender: no records coded as man or woman were found.\n".to_string(),
        Some((male, female)) => format!(
            "Patient gender ({} {}):\n  Male:   {:>5} ({male:.1}%)\n  Female: {:>5} ({female:.1}%)\n",
            stats.total(),
            plural(stats.total(), "patient"),
            stats.primary_count,
            stats.secondary_count,
        ),
    }
}

/// Records table with a running number, the five record columns and the
/// edit action (`#<index>` for overlay rows).
pub fn records_table(entries: &[&CatalogueEntry], sort: Option<SortSpec>) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("No")];
    header.extend(
        RECORD_COLUMNS
            .iter()
            .map(|field| header_cell(&column_label(*field, sort))),
    );
    header.push(header_cell("Action"));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);

    for (position, entry) in entries.iter().enumerate() {
        let record = entry.record();
        let mut row = vec![dim_cell(position + 1)];
        row.extend(RECORD_COLUMNS.iter().map(|field| Cell::new(record.field(*field))));
        row.push(action_cell(entry));
        table.add_row(row);
    }
    table
}

pub fn frequency_table(rows: &[FrequencyRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("No"),
        header_cell("SNOMED CT code"),
        header_cell("FSN"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (position, row) in rows.iter().enumerate() {
        table.add_row(vec![
            dim_cell(position + 1),
            Cell::new(&row.code),
            Cell::new(&row.display_name),
            Cell::new(row.count),
        ]);
    }
    table
}

pub fn categories_table(categories: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category")]);
    apply_table_style(&mut table);
    for category in categories {
        table.add_row(vec![Cell::new(category)]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ]);
    }
}

fn column_label(field: RecordField, sort: Option<SortSpec>) -> String {
    match sort {
        Some(spec) if spec.field == field => {
            let arrow = match spec.direction {
                SortDirection::Ascending => '▲',
                SortDirection::Descending => '▼',
            };
            format!("{} {arrow}", field.label())
        }
        _ => field.label().to_string(),
    }
}

fn action_cell(entry: &CatalogueEntry) -> Cell {
    if entry.is_editable() {
        Cell::new(format!("#{}", entry.index()))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(NOT_EDITABLE)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_column_carries_direction_arrow() {
        let spec = Some(SortSpec::descending(RecordField::Code));
        assert_eq!(column_label(RecordField::Code, spec), "SNOMED CT code ▼");
        assert_eq!(column_label(RecordField::Category, spec), "Category");
    }
}
