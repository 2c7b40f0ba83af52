use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bloodwork_cli::request::build_input;
use bloodwork_cli::summary::{markers_table, nutrients_table, print_report, tables_summary_table};
use bloodwork_engine::Engine;
use bloodwork_model::AnalysisReport;
use bloodwork_standards::ClinicalTables;

use crate::cli::{AnalyzeArgs, TablesArgs};

pub fn load_tables(cli_dir: Option<&Path>) -> Result<ClinicalTables> {
    let tables = ClinicalTables::load(cli_dir).context("load clinical tables")?;
    info!(
        source = %tables.source,
        version = %tables.version(),
        "clinical tables loaded"
    );
    Ok(tables)
}

/// Run the engine over the assembled request.
///
/// Engine input errors are returned unwrapped so the caller can tell them
/// apart from I/O and parse failures.
pub fn run_analyze(args: &AnalyzeArgs, tables: &ClinicalTables) -> Result<AnalysisReport> {
    let span = info_span!("request", measurement_flags = args.measurements.len());
    let _guard = span.enter();
    let input = build_input(args.input.as_deref(), &args.measurements)?;
    let report = Engine::new(tables).analyze(&input)?;
    Ok(report)
}

pub fn print_analysis(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{body}");
    } else {
        print_report(report);
    }
    Ok(())
}

pub fn run_markers(tables: &ClinicalTables) {
    println!("{}", markers_table(tables.reference()));
}

pub fn run_nutrients(tables: &ClinicalTables) {
    println!("{}", nutrients_table(tables.nutrition()));
}

pub fn run_tables(args: &TablesArgs, tables: &ClinicalTables) -> Result<()> {
    let summary = tables.summary();
    if args.json {
        let body = serde_json::to_string_pretty(&summary).context("serialize table summary")?;
        println!("{body}");
    } else {
        println!("{}", tables_summary_table(&summary));
    }
    Ok(())
}
