//! Type-safe enumerations for blood-test markers and evaluation statuses.
//!
//! The supported marker set is closed: every marker the engine can evaluate
//! is a variant of [`Marker`], and the reference tables are validated against
//! [`Marker::ALL`] when they are loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A blood-test marker supported by the engine.
///
/// Variant order is the canonical marker order. Evaluations are always
/// reported in this order, regardless of the order of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Hemoglobin (HGB).
    #[serde(rename = "Hemoglobin")]
    Hemoglobin,

    /// Total cholesterol (TCHO).
    #[serde(rename = "Total Cholesterol")]
    TotalCholesterol,

    /// HDL cholesterol.
    #[serde(rename = "HDL Cholesterol")]
    HdlCholesterol,

    /// LDL cholesterol.
    #[serde(rename = "LDL Cholesterol")]
    LdlCholesterol,

    /// Triglycerides (TG).
    #[serde(rename = "Triglycerides")]
    Triglycerides,

    /// Aspartate aminotransferase.
    #[serde(rename = "AST")]
    Ast,

    /// Alanine aminotransferase.
    #[serde(rename = "ALT")]
    Alt,

    /// Gamma-glutamyl transpeptidase.
    #[serde(rename = "γ-GTP")]
    GammaGtp,
}

impl Marker {
    /// All supported markers, in canonical order.
    pub const ALL: [Marker; 8] = [
        Marker::Hemoglobin,
        Marker::TotalCholesterol,
        Marker::HdlCholesterol,
        Marker::LdlCholesterol,
        Marker::Triglycerides,
        Marker::Ast,
        Marker::Alt,
        Marker::GammaGtp,
    ];

    /// Returns the canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Hemoglobin => "Hemoglobin",
            Marker::TotalCholesterol => "Total Cholesterol",
            Marker::HdlCholesterol => "HDL Cholesterol",
            Marker::LdlCholesterol => "LDL Cholesterol",
            Marker::Triglycerides => "Triglycerides",
            Marker::Ast => "AST",
            Marker::Alt => "ALT",
            Marker::GammaGtp => "γ-GTP",
        }
    }

    /// Returns the short laboratory code.
    pub fn code(&self) -> &'static str {
        match self {
            Marker::Hemoglobin => "HGB",
            Marker::TotalCholesterol => "TCHO",
            Marker::HdlCholesterol => "HDL",
            Marker::LdlCholesterol => "LDL",
            Marker::Triglycerides => "TG",
            Marker::Ast => "AST",
            Marker::Alt => "ALT",
            Marker::GammaGtp => "GGT",
        }
    }

    /// Additional accepted spellings, including the Japanese labels used on
    /// health-checkup result sheets.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Marker::Hemoglobin => &["ヘモグロビン", "Hb"],
            Marker::TotalCholesterol => &["総コレステロール", "T-CHO"],
            Marker::HdlCholesterol => &["HDLコレステロール", "HDL-C"],
            Marker::LdlCholesterol => &["LDLコレステロール", "LDL-C"],
            Marker::Triglycerides => &["中性脂肪", "TG"],
            Marker::Ast => &["GOT"],
            Marker::Alt => &["GPT"],
            Marker::GammaGtp => &["gamma-GTP", "GGTP", "γ-GT"],
        }
    }

    /// Returns the position of this marker in canonical order.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Marker {
    type Err = String;

    /// Parse a marker from its canonical name, code, or an alias.
    /// Matching trims surrounding whitespace and ignores case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(format!("Unknown marker: {s}"));
        }
        Marker::ALL
            .into_iter()
            .find(|marker| {
                std::iter::once(marker.as_str())
                    .chain(std::iter::once(marker.code()))
                    .chain(marker.aliases().iter().copied())
                    .any(|name| name.to_uppercase() == normalized)
            })
            .ok_or_else(|| format!("Unknown marker: {s}"))
    }
}

/// Classification of a measurement relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Above the upper bound.
    High,
    /// Below the lower bound.
    Low,
    /// Within the range, bounds included.
    Normal,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::High => "High",
            Status::Low => "Low",
            Status::Normal => "Normal",
        }
    }

    /// Returns true for High and Low.
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Status::Normal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" | "H" => Ok(Status::High),
            "LOW" | "L" => Ok(Status::Low),
            "NORMAL" | "N" => Ok(Status::Normal),
            _ => Err(format!("Unknown status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_str() {
        assert_eq!("Hemoglobin".parse::<Marker>().unwrap(), Marker::Hemoglobin);
        assert_eq!("  hgb ".parse::<Marker>().unwrap(), Marker::Hemoglobin);
        assert_eq!("中性脂肪".parse::<Marker>().unwrap(), Marker::Triglycerides);
        assert_eq!("γ-GTP".parse::<Marker>().unwrap(), Marker::GammaGtp);
        assert_eq!("gamma-gtp".parse::<Marker>().unwrap(), Marker::GammaGtp);
        assert_eq!("ldl cholesterol".parse::<Marker>().unwrap(), Marker::LdlCholesterol);
        assert!("unknown_marker".parse::<Marker>().is_err());
        assert!("".parse::<Marker>().is_err());
    }

    #[test]
    fn test_marker_canonical_order() {
        for (index, marker) in Marker::ALL.iter().enumerate() {
            assert_eq!(marker.ordinal(), index);
        }
        let mut sorted = Marker::ALL;
        sorted.sort();
        assert_eq!(sorted, Marker::ALL);
    }

    #[test]
    fn test_marker_names_are_unambiguous() {
        for marker in Marker::ALL {
            assert_eq!(marker.as_str().parse::<Marker>().unwrap(), marker);
            assert_eq!(marker.code().parse::<Marker>().unwrap(), marker);
            for alias in marker.aliases() {
                assert_eq!(alias.parse::<Marker>().unwrap(), marker, "alias {alias}");
            }
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("high".parse::<Status>().unwrap(), Status::High);
        assert_eq!("L".parse::<Status>().unwrap(), Status::Low);
        assert_eq!("Normal".parse::<Status>().unwrap(), Status::Normal);
        assert!("elevated".parse::<Status>().is_err());
        assert!(Status::High.is_abnormal());
        assert!(!Status::Normal.is_abnormal());
    }
}
