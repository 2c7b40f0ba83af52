use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::Status;

/// Clinical reference range for a marker.
///
/// Either bound may be absent. An absent bound never triggers a High or Low
/// classification. Bounds are inclusive: a value equal to a bound is Normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub unit: String,
}

impl ReferenceRange {
    /// Build a validated range.
    ///
    /// # Errors
    ///
    /// Returns an error when neither bound is present, a bound is not finite,
    /// or the lower bound exceeds the upper bound.
    pub fn new(
        lower: Option<f64>,
        upper: Option<f64>,
        unit: impl Into<String>,
    ) -> Result<Self, RangeError> {
        if lower.is_none() && upper.is_none() {
            return Err(RangeError::NoBounds);
        }
        for bound in [lower, upper].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(RangeError::NonFinite { bound });
            }
        }
        if let (Some(lower), Some(upper)) = (lower, upper)
            && lower > upper
        {
            return Err(RangeError::Inverted { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            unit: unit.into(),
        })
    }

    /// Classify a value against this range.
    pub fn classify(&self, value: f64) -> Status {
        if let Some(upper) = self.upper
            && value > upper
        {
            return Status::High;
        }
        if let Some(lower) = self.lower
            && value < lower
        {
            return Status::Low;
        }
        Status::Normal
    }

    pub fn contains(&self, value: f64) -> bool {
        self.classify(value) == Status::Normal
    }

    /// Range bounds without the unit, e.g. `13.1 - 16.3` or `>= 40`.
    pub fn bounds_label(&self) -> String {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => format!("{lower} - {upper}"),
            (Some(lower), None) => format!(">= {lower}"),
            (None, Some(upper)) => format!("<= {upper}"),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.bounds_label())
        } else {
            write!(f, "{} {}", self.bounds_label(), self.unit)
        }
    }
}
