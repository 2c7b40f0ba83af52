//! Reference range table.
//!
//! Maps every supported [`Marker`] to its [`ReferenceRange`]. The table must
//! cover the closed marker set exactly; a table missing a marker, listing a
//! marker twice, or naming a marker outside the set is rejected at load time.

use std::collections::BTreeMap;
use std::path::Path;

use bloodwork_model::{EngineError, Marker, ReferenceRange};

use crate::csv_utils::read_csv_rows;
use crate::error::{Result, StandardsError};

const COLUMNS: &[&str] = &["Marker", "Lower", "Upper", "Unit"];

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    ranges: BTreeMap<Marker, ReferenceRange>,
}

impl ReferenceTable {
    /// Build a table from already-validated ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::MissingMarker`] when any supported marker
    /// has no range.
    pub fn new(ranges: BTreeMap<Marker, ReferenceRange>) -> Result<Self> {
        if let Some(marker) = Marker::ALL.into_iter().find(|m| !ranges.contains_key(m)) {
            return Err(StandardsError::MissingMarker { marker });
        }
        Ok(Self { ranges })
    }

    /// Parse `Marker,Lower,Upper,Unit` CSV content. Empty bounds are absent.
    pub fn from_csv_str(content: &str, path: &Path) -> Result<Self> {
        let mut ranges = BTreeMap::new();
        for row in read_csv_rows(content, path, COLUMNS)? {
            let name = row.require(path, "Marker")?;
            let marker = name
                .parse::<Marker>()
                .map_err(|_| StandardsError::UnknownMarker {
                    path: path.to_path_buf(),
                    line: row.line,
                    name: name.to_string(),
                })?;
            let lower = parse_bound(row.get_optional("Lower"), path, row.line)?;
            let upper = parse_bound(row.get_optional("Upper"), path, row.line)?;
            let range = ReferenceRange::new(lower, upper, row.get_field("Unit")).map_err(
                |source| StandardsError::InvalidRange {
                    path: path.to_path_buf(),
                    marker,
                    source,
                },
            )?;
            if ranges.insert(marker, range).is_some() {
                return Err(StandardsError::row(
                    path,
                    row.line,
                    format!("duplicate reference range for {marker}"),
                ));
            }
        }
        Self::new(ranges)
    }

    /// Range for a marker. Always present for a table built by this module.
    pub fn range_for(&self, marker: Marker) -> Option<&ReferenceRange> {
        self.ranges.get(&marker)
    }

    /// Resolve a caller-supplied marker name against the supported set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedMarker`] for names outside the set.
    pub fn resolve(&self, name: &str) -> std::result::Result<Marker, EngineError> {
        name.parse::<Marker>()
            .ok()
            .filter(|marker| self.ranges.contains_key(marker))
            .ok_or_else(|| EngineError::UnsupportedMarker {
                name: name.to_string(),
            })
    }

    /// Entries in canonical marker order.
    pub fn iter(&self) -> impl Iterator<Item = (Marker, &ReferenceRange)> {
        self.ranges.iter().map(|(marker, range)| (*marker, range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn parse_bound(raw: Option<&str>, path: &Path, line: u64) -> Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| StandardsError::row(path, line, format!("invalid bound '{raw}'")))
}
