//! Terminal tables for analysis results and clinical tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bloodwork_model::{AnalysisReport, RecommendationSet, Status};
use bloodwork_standards::{NutrientMap, ReferenceTable, TablesSummary};

pub fn print_report(report: &AnalysisReport) {
    println!("{}", analysis_table(report));
    match empty_recommendations_note(report) {
        Some(note) => println!("{note}"),
        None => {
            println!();
            println!("Recommendations:");
            println!("{}", recommendation_table(&report.recommendations));
        }
    }
}

/// Line printed in place of the recommendation table, if it is empty.
///
/// Out-of-range markers without nutrient guidance still leave the table
/// empty, so "all normal" is only claimed when every marker is Normal.
pub fn empty_recommendations_note(report: &AnalysisReport) -> Option<&'static str> {
    if !report.recommendations.is_empty() {
        return None;
    }
    if report.is_all_normal() {
        Some("All markers are within their reference ranges. No recommendations.")
    } else {
        Some("No recommendations.")
    }
}

pub fn analysis_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Marker"),
        header_cell("Value"),
        header_cell("Reference Range"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for evaluation in &report.analysis {
        table.add_row(vec![
            Cell::new(evaluation.marker.as_str()).add_attribute(Attribute::Bold),
            Cell::new(format!("{} {}", evaluation.value, evaluation.unit)),
            Cell::new(&evaluation.reference_range),
            status_cell(evaluation.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.analysis.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_summary_cell(report.high_count(), report.low_count()),
    ]);
    table
}

pub fn recommendation_table(recommendations: &RecommendationSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Nutrient"), header_cell("Foods")]);
    apply_table_style(&mut table);
    for (nutrient, foods) in recommendations.iter() {
        let foods: Vec<&str> = foods.iter().map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(nutrient)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(foods.join(", ")),
        ]);
    }
    table
}

pub fn markers_table(reference: &ReferenceTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Marker"),
        header_cell("Code"),
        header_cell("Lower"),
        header_cell("Upper"),
        header_cell("Unit"),
        header_cell("Also Accepted"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (marker, range) in reference.iter() {
        table.add_row(vec![
            Cell::new(marker.as_str()).add_attribute(Attribute::Bold),
            Cell::new(marker.code()),
            bound_cell(range.lower),
            bound_cell(range.upper),
            Cell::new(&range.unit),
            Cell::new(marker.aliases().join(", ")),
        ]);
    }
    table
}

pub fn nutrients_table(nutrition: &NutrientMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Marker"),
        header_cell("Status"),
        header_cell("Nutrient"),
        header_cell("Foods"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (marker, status, nutrients) in nutrition.rules() {
        for nutrient in nutrients {
            table.add_row(vec![
                Cell::new(marker.as_str()).add_attribute(Attribute::Bold),
                status_cell(status),
                Cell::new(nutrient),
                Cell::new(nutrition.foods_for(nutrient).join(", ")),
            ]);
        }
    }
    table
}

pub fn tables_summary_table(summary: &TablesSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows: [(&str, String); 7] = [
        ("Version", summary.version.clone()),
        ("Source", summary.source.clone()),
        ("Fingerprint", summary.fingerprint.clone()),
        ("Markers", summary.marker_count.to_string()),
        ("Rules", summary.rule_count.to_string()),
        ("Nutrients", summary.nutrient_count.to_string()),
        ("Foods", summary.food_count.to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::High => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Status::Low => Cell::new(status.as_str())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        Status::Normal => Cell::new(status.as_str()).fg(Color::Green),
    }
}

fn count_summary_cell(high: usize, low: usize) -> Cell {
    if high + low == 0 {
        return Cell::new("all normal").fg(Color::Green);
    }
    Cell::new(format!("{high} high / {low} low"))
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)
}

fn bound_cell(bound: Option<f64>) -> Cell {
    match bound {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
