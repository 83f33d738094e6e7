use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info};

use snomed_cli::logging::redact_value;
use snomed_cli::render::{
    categories_table, format_gender_summary, format_search_results, frequency_table,
    records_table,
};
use snomed_model::{CatalogueEntry, RawRecord, Record};
use snomed_query::{SortSpec, TableQuery, categories, project, search_with_usage};
use snomed_stats::{FrequencyRow, GenderStats, gender_stats};
use snomed_store::{CatalogueConfig, CatalogueError, FileCatalogue};

use crate::cli::{AddArgs, Cli, EditArgs, SearchArgs, TableArgs};

/// Open the catalogue with CLI flags taking precedence over the environment.
pub fn open_catalogue(cli: &Cli) -> FileCatalogue {
    CatalogueConfig::from_env()
        .with_data_file(cli.data.clone())
        .with_overlay_dir(cli.overlay_dir.clone())
        .open()
}

/// Print a catalogue error with its suggestion to stderr.
pub fn print_diagnostic(error: &CatalogueError) {
    eprintln!("error: {}", error.user_message());
    if let Some(suggestion) = error.suggestion() {
        eprintln!("hint: {suggestion}");
    }
}

/// Load for a read-only command. A failed load is reported and the command
/// continues on the empty working set.
fn load_for_reading(catalogue: &mut FileCatalogue) {
    if let Err(error) = catalogue.reload() {
        error!(error = %error, "catalogue could not be loaded");
        print_diagnostic(&error);
    }
}

pub fn run_search(catalogue: &mut FileCatalogue, args: &SearchArgs, json: bool) -> Result<()> {
    load_for_reading(catalogue);
    let hits = search_with_usage(catalogue.current(), &args.query);
    if json {
        print_json(&hits)?;
    } else {
        print!("{}", format_search_results(&args.query, &hits));
    }
    Ok(())
}

#[derive(Serialize)]
struct TableRow<'a> {
    index: usize,
    editable: bool,
    #[serde(flatten)]
    record: &'a Record,
}

impl<'a> From<&'a CatalogueEntry> for TableRow<'a> {
    fn from(entry: &'a CatalogueEntry) -> Self {
        Self {
            index: entry.index(),
            editable: entry.is_editable(),
            record: entry.record(),
        }
    }
}

pub fn run_table(catalogue: &mut FileCatalogue, args: &TableArgs, json: bool) -> Result<()> {
    load_for_reading(catalogue);
    let sort = args.sort.map(|field| {
        if args.descending {
            SortSpec::descending(field.into())
        } else {
            SortSpec::ascending(field.into())
        }
    });
    let mut query = TableQuery::new().with_sort(sort);
    if let Some(category) = &args.category {
        query = query.with_category(category.as_str());
    }
    if let Some(search) = &args.search {
        query = query.with_search(search.as_str());
    }

    let rows = project(catalogue.current(), &query);
    if json {
        let rows: Vec<TableRow<'_>> = rows.iter().copied().map(TableRow::from).collect();
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No data to display.");
        return Ok(());
    }
    println!("{}", records_table(&rows, sort));
    Ok(())
}

pub fn run_categories(catalogue: &mut FileCatalogue, json: bool) -> Result<()> {
    load_for_reading(catalogue);
    let categories = categories(catalogue.current());
    if json {
        return print_json(&categories);
    }
    println!("{}", categories_table(&categories));
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    gender: GenderStats,
    frequency: Vec<FrequencyRow>,
}

pub fn run_stats(catalogue: &mut FileCatalogue, json: bool) -> Result<()> {
    load_for_reading(catalogue);
    let set = catalogue.current();
    let report = StatsReport {
        gender: gender_stats(set),
        frequency: snomed_stats::frequency_table(set),
    };
    if json {
        return print_json(&report);
    }
    print!("{}", format_gender_summary(&report.gender));
    println!();
    println!("SNOMED CT code frequency (FSN)");
    if report.frequency.is_empty() {
        println!("No valid SNOMED CT codes to analyse.");
    } else {
        println!("{}", frequency_table(&report.frequency));
    }
    Ok(())
}

pub fn run_add(catalogue: &mut FileCatalogue, args: &AddArgs) -> Result<()> {
    catalogue.reload().context("load catalogue")?;
    let entry = RawRecord::new(
        args.registration.as_str(),
        args.category.as_str(),
        args.text.as_str(),
        args.code.as_str(),
        args.name.as_str(),
    );
    let set = catalogue.append_overlay(entry).context("add record")?;
    let index = set.baseline_len();
    info!(
        registration = redact_value(&args.registration),
        index, "record added"
    );
    println!("Record added as #{index}.");
    Ok(())
}

pub fn run_edit(catalogue: &mut FileCatalogue, args: &EditArgs) -> Result<()> {
    catalogue.reload().context("load catalogue")?;
    let (handle, entry) = {
        let current = catalogue.authorize_edit(args.index)?;
        let record = current.record();
        let handle = current
            .provenance()
            .handle()
            .ok_or(CatalogueError::EditUnauthorized { index: args.index })?;
        let entry = RawRecord::new(
            pick(args.registration.as_deref(), record.registration_id()),
            pick(args.category.as_deref(), record.category()),
            pick(args.text.as_deref(), record.original_text()),
            pick(args.code.as_deref(), record.code()),
            pick(args.name.as_deref(), record.display_name()),
        );
        (handle, entry)
    };
    catalogue.edit(handle, entry).context("save record")?;
    info!(index = args.index, "record edited");
    println!("Record #{} updated.", args.index);
    Ok(())
}

/// Omitted edit fields keep the current value.
fn pick(replacement: Option<&str>, current: &str) -> String {
    replacement.unwrap_or(current).to_string()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}
