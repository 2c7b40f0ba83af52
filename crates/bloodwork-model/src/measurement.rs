//! Raw measurement input as supplied by a caller.
//!
//! Transport layers hand over a mapping from marker name to a number or a
//! numeric string. Nothing here is validated; resolution against the closed
//! marker set and numeric parsing happen in the evaluator so that the whole
//! input is checked before any evaluation is produced.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Marker;

/// A single raw value: either a JSON number or a string that should hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// Returns the value as a finite number, or `None` when it is
    /// non-numeric, empty, NaN or infinite.
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            InputValue::Number(value) => *value,
            InputValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(value) => write!(f, "{value}"),
            InputValue::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

/// Mapping from marker name (as supplied) to raw value.
///
/// Keys are kept sorted so that validation reports errors in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementInput {
    values: BTreeMap<String, InputValue>,
}

impl MeasurementInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<InputValue>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Merge another input into this one; entries from `other` win.
    pub fn extend(&mut self, other: MeasurementInput) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for MeasurementInput
where
    K: Into<String>,
    V: Into<InputValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (name, value) in iter {
            input.insert(name, value);
        }
        input
    }
}

/// A validated measurement: a supported marker and a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub marker: Marker,
    pub value: f64,
}

impl Measurement {
    pub fn new(marker: Marker, value: f64) -> Self {
        Self { marker, value }
    }
}

/// Request body accepted by transport layers: `{"data": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub data: MeasurementInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_values_are_parsed() {
        assert_eq!(InputValue::from(" 12.5 ").to_finite(), Some(12.5));
        assert_eq!(InputValue::from("1e2").to_finite(), Some(100.0));
        assert_eq!(InputValue::from("").to_finite(), None);
        assert_eq!(InputValue::from("abc").to_finite(), None);
        assert_eq!(InputValue::from("NaN").to_finite(), None);
        assert_eq!(InputValue::from("inf").to_finite(), None);
    }

    #[test]
    fn number_values_must_be_finite() {
        assert_eq!(InputValue::from(60.0).to_finite(), Some(60.0));
        assert_eq!(InputValue::from(f64::NAN).to_finite(), None);
        assert_eq!(InputValue::from(f64::NEG_INFINITY).to_finite(), None);
    }

    #[test]
    fn later_insert_replaces_earlier() {
        let mut input = MeasurementInput::new().with("AST", 60.0);
        input.insert("AST", "30");
        assert_eq!(input.len(), 1);
        let (_, value) = input.iter().next().unwrap();
        assert_eq!(value.to_finite(), Some(30.0));
    }
}
