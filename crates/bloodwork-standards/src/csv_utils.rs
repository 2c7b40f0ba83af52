//! Shared CSV utilities for loading table files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// One data row with its 1-based line number in the source file.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub line: u64,
    pub fields: BTreeMap<String, String>,
}

impl CsvRow {
    /// Get a field value, returning empty string if not present.
    pub fn get_field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Get an optional field value (None if empty or missing).
    pub fn get_optional(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Get a field that must be non-empty.
    pub fn require(&self, path: &Path, key: &str) -> Result<&str> {
        self.get_optional(key)
            .ok_or_else(|| StandardsError::row(path, self.line, format!("missing value for '{key}'")))
    }
}

/// Read CSV content into row maps keyed by header.
///
/// Handles BOM characters and trims whitespace from headers and values.
/// Every name in `required` must appear in the header row.
pub fn read_csv_rows(content: &str, path: &Path, required: &[&str]) -> Result<Vec<CsvRow>> {
    let csv_error = |error: csv::Error| StandardsError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    for column in required {
        if !headers.iter().any(|header| header == column) {
            return Err(StandardsError::Csv {
                path: path.to_path_buf(),
                message: format!("missing column '{column}'"),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        let mut fields = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            fields.insert(key, value.trim().to_string());
        }
        if fields.values().all(String::is_empty) {
            continue;
        }
        rows.push(CsvRow { line, fields });
    }
    Ok(rows)
}
