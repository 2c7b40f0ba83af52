use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Marker, ReferenceRange, Status};

/// Evaluation of one supplied measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub marker: Marker,
    pub value: f64,
    /// Formatted range including the unit, e.g. `13.1 - 16.3 g/dL`.
    pub reference_range: String,
    pub unit: String,
    pub status: Status,
}

impl Evaluation {
    pub fn new(marker: Marker, value: f64, range: &ReferenceRange) -> Self {
        Self {
            marker,
            value,
            reference_range: range.to_string(),
            unit: range.unit.clone(),
            status: range.classify(value),
        }
    }

    pub fn is_abnormal(&self) -> bool {
        self.status.is_abnormal()
    }
}

/// Nutrient name to the foods rich in it.
///
/// Both levels are sorted sets, so a food appears at most once per nutrient
/// and serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationSet {
    nutrients: BTreeMap<String, BTreeSet<String>>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add foods for a nutrient, merging with foods already present.
    pub fn add<I, S>(&mut self, nutrient: &str, foods: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nutrients
            .entry(nutrient.to_string())
            .or_default()
            .extend(foods.into_iter().map(Into::into));
    }

    pub fn foods(&self, nutrient: &str) -> Option<&BTreeSet<String>> {
        self.nutrients.get(nutrient)
    }

    pub fn contains_nutrient(&self, nutrient: &str) -> bool {
        self.nutrients.contains_key(nutrient)
    }

    pub fn nutrients(&self) -> impl Iterator<Item = &str> {
        self.nutrients.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.nutrients
            .iter()
            .map(|(nutrient, foods)| (nutrient.as_str(), foods))
    }

    pub fn len(&self) -> usize {
        self.nutrients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }
}

/// Combined engine output: evaluations in canonical marker order plus the
/// merged recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: Vec<Evaluation>,
    pub recommendations: RecommendationSet,
}

impl AnalysisReport {
    pub fn high_count(&self) -> usize {
        self.count(Status::High)
    }

    pub fn low_count(&self) -> usize {
        self.count(Status::Low)
    }

    pub fn abnormal_count(&self) -> usize {
        self.analysis
            .iter()
            .filter(|evaluation| evaluation.is_abnormal())
            .count()
    }

    pub fn is_all_normal(&self) -> bool {
        self.abnormal_count() == 0
    }

    fn count(&self, status: Status) -> usize {
        self.analysis
            .iter()
            .filter(|evaluation| evaluation.status == status)
            .count()
    }
}
