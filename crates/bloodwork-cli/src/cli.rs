//! CLI argument definitions for the bloodwork engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bloodwork_cli::request::parse_measurement_arg;

#[derive(Parser)]
#[command(
    name = "bloodwork",
    version,
    about = "Blood-test evaluation - classify markers and suggest foods",
    long_about = "Classify blood-test measurements against clinical reference ranges.\n\n\
                  Markers outside their range are reported as High or Low, and the\n\
                  nutrients (with foods rich in them) that address them are suggested."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow measurement values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Load clinical tables from this directory instead of the built-in copy.
    ///
    /// Overrides the BLOODWORK_TABLES_DIR environment variable. The directory
    /// must contain a manifest.toml whose SHA-256 pins match its CSV files.
    #[arg(long = "tables-dir", value_name = "DIR", global = true)]
    pub tables_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate measurements and print recommendations.
    Analyze(AnalyzeArgs),

    /// List supported markers with their reference ranges.
    Markers,

    /// List nutrient guidance per marker status.
    Nutrients,

    /// Show the version and fingerprint of the loaded clinical tables.
    Tables(TablesArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Request JSON file (`{"data": {...}}`), or `-` for stdin.
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// A single measurement, e.g. `-m Hemoglobin=12.5`. Repeatable.
    #[arg(
        long = "measurement",
        short = 'm',
        value_name = "NAME=VALUE",
        value_parser = parse_measurement_arg
    )]
    pub measurements: Vec<(String, String)>,

    /// Print the report (or error) as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct TablesArgs {
    /// Print the summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
