//! SNOMED CT coding catalogue CLI.

use clap::{ColorChoice, Parser};
use snomed_cli::logging::{LogConfig, LogFormat, init_logging};
use snomed_store::CatalogueError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    open_catalogue, print_diagnostic, run_add, run_categories, run_edit, run_search, run_stats,
    run_table,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let mut catalogue = open_catalogue(&cli);
    let result = match &cli.command {
        Command::Search(args) => run_search(&mut catalogue, args, cli.json),
        Command::Table(args) => run_table(&mut catalogue, args, cli.json),
        Command::Categories => run_categories(&mut catalogue, cli.json),
        Command::Stats => run_stats(&mut catalogue, cli.json),
        Command::Add(args) => run_add(&mut catalogue, args),
        Command::Edit(args) => run_edit(&mut catalogue, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            match error.downcast_ref::<CatalogueError>() {
                Some(catalogue_error) => print_diagnostic(catalogue_error),
                None => eprintln!("error: {error:#}"),
            }
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
