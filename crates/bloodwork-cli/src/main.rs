//! Bloodwork CLI.

use bloodwork_cli::logging::{LogConfig, LogFormat, init_logging};
use bloodwork_model::{EngineError, ErrorPayload};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    load_tables, print_analysis, run_analyze, run_markers, run_nutrients, run_tables,
};

/// Exit code for measurement input the engine rejected.
const EXIT_INPUT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let tables = match load_tables(cli.tables_dir.as_deref()) {
        Ok(tables) => tables,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match &cli.command {
        Command::Analyze(args) => match run_analyze(args, &tables) {
            Ok(report) => match print_analysis(&report, args.json) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            },
            Err(error) => match error.downcast_ref::<EngineError>() {
                Some(engine_error) => {
                    if args.json {
                        let payload = ErrorPayload::from(engine_error);
                        match serde_json::to_string_pretty(&payload) {
                            Ok(body) => println!("{body}"),
                            Err(_) => eprintln!("error: {engine_error}"),
                        }
                    } else {
                        eprintln!("error: {engine_error}");
                    }
                    EXIT_INPUT_ERROR
                }
                None => {
                    eprintln!("error: {error:#}");
                    1
                }
            },
        },
        Command::Markers => {
            run_markers(&tables);
            0
        }
        Command::Nutrients => {
            run_nutrients(&tables);
            0
        }
        Command::Tables(args) => match run_tables(args, &tables) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
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
