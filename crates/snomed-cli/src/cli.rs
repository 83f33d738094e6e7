//! CLI argument definitions for the coding catalogue.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use snomed_model::RecordField;
use snomed_store::{DATA_FILE_ENV_VAR, OVERLAY_DIR_ENV_VAR};

#[derive(Parser)]
#[command(
    name = "snomed",
    version,
    about = "SNOMED CT coding catalogue - search, browse and count coded records",
    long_about = "Search, browse and count clinical records coded with SNOMED CT.\n\n\
                  Records come from a read-only JSON data file plus your own entries,\n\
                  which are stored separately and are the only editable records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Baseline JSON data file.
    #[arg(long = "data", value_name = "PATH", env = DATA_FILE_ENV_VAR, global = true)]
    pub data: Option<PathBuf>,

    /// Directory holding your own entries.
    #[arg(long = "overlay-dir", value_name = "DIR", env = OVERLAY_DIR_ENV_VAR, global = true)]
    pub overlay_dir: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow registration numbers to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search display names and original texts; one result per code.
    Search(SearchArgs),

    /// List records with optional filter, search and sort.
    Table(TableArgs),

    /// List the categories present in the data.
    Categories,

    /// Show gender counts and the code-frequency table.
    Stats,

    /// Add a record to your own entries.
    Add(AddArgs),

    /// Edit one of your own entries.
    Edit(EditArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive).
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct TableArgs {
    /// Only show records of this category (exact match).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Only show records where any field contains this text.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by this column.
    #[arg(long = "sort", value_enum, value_name = "FIELD")]
    pub sort: Option<FieldArg>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub descending: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Patient registration number.
    #[arg(long = "registration", value_name = "ID")]
    pub registration: String,

    /// Record category (e.g. person, finding, disorder).
    #[arg(long = "category")]
    pub category: String,

    /// Original free text.
    #[arg(long = "text", default_value = "")]
    pub text: String,

    /// SNOMED CT code.
    #[arg(long = "code", default_value = "")]
    pub code: String,

    /// Fully specified name of the code.
    #[arg(long = "name", default_value = "")]
    pub name: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Record index as shown in the action column of `table`.
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// New registration number (keeps the current value when omitted).
    #[arg(long = "registration", value_name = "ID")]
    pub registration: Option<String>,

    /// New category.
    #[arg(long = "category")]
    pub category: Option<String>,

    /// New original text.
    #[arg(long = "text")]
    pub text: Option<String>,

    /// New SNOMED CT code.
    #[arg(long = "code")]
    pub code: Option<String>,

    /// New fully specified name.
    #[arg(long = "name")]
    pub name: Option<String>,
}

/// Sortable columns.
#[derive(Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Registration,
    Category,
    Text,
    Code,
    Name,
}

impl From<FieldArg> for RecordField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Registration => RecordField::RegistrationId,
            FieldArg::Category => RecordField::Category,
            FieldArg::Text => RecordField::OriginalText,
            FieldArg::Code => RecordField::Code,
            FieldArg::Name => RecordField::DisplayName,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
