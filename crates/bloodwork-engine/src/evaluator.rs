//! Classification of measurements against the reference table.
//!
//! Input is validated as a whole before any evaluation is produced: an empty
//! input, an unsupported marker name, a non-finite or non-numeric value, or
//! the same marker supplied twice rejects the entire call.
//!
//! Evaluations are returned in canonical marker order (the declaration order
//! of [`Marker`]), independent of the order the caller supplied them in.

use std::collections::BTreeMap;

use tracing::debug;

use bloodwork_model::{EngineError, Evaluation, Marker, Measurement, MeasurementInput, Result};
use bloodwork_standards::ReferenceTable;

#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    reference: &'a ReferenceTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(reference: &'a ReferenceTable) -> Self {
        Self { reference }
    }

    /// Validate raw input and classify every measurement.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] describing the first invalid entry, in key
    /// order. No evaluations are returned on error.
    pub fn evaluate(&self, input: &MeasurementInput) -> Result<Vec<Evaluation>> {
        let measurements = self.measurements_from(input)?;
        self.evaluate_measurements(&measurements)
    }

    /// Resolve names and parse values without classifying.
    pub fn measurements_from(&self, input: &MeasurementInput) -> Result<Vec<Measurement>> {
        if input.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let mut measurements = Vec::with_capacity(input.len());
        for (name, raw) in input.iter() {
            let marker = self.reference.resolve(name)?;
            let value = raw.to_finite().ok_or_else(|| EngineError::InvalidValue {
                marker: marker.to_string(),
                value: raw.to_string(),
            })?;
            measurements.push(Measurement::new(marker, value));
        }
        Ok(measurements)
    }

    /// Classify already-resolved measurements.
    pub fn evaluate_measurements(&self, measurements: &[Measurement]) -> Result<Vec<Evaluation>> {
        if measurements.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let mut by_marker: BTreeMap<Marker, f64> = BTreeMap::new();
        for measurement in measurements {
            if !measurement.value.is_finite() {
                return Err(EngineError::InvalidValue {
                    marker: measurement.marker.to_string(),
                    value: measurement.value.to_string(),
                });
            }
            if by_marker
                .insert(measurement.marker, measurement.value)
                .is_some()
            {
                return Err(EngineError::DuplicateMarker {
                    marker: measurement.marker.to_string(),
                });
            }
        }

        let mut evaluations = Vec::with_capacity(by_marker.len());
        for (marker, value) in by_marker {
            let range = self
                .reference
                .range_for(marker)
                .ok_or_else(|| EngineError::UnsupportedMarker {
                    name: marker.to_string(),
                })?;
            let evaluation = Evaluation::new(marker, value, range);
            debug!(
                marker = %marker,
                status = %evaluation.status,
                reference_range = %evaluation.reference_range,
                "evaluated marker"
            );
            evaluations.push(evaluation);
        }
        Ok(evaluations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodwork_model::Status;
    use bloodwork_standards::ClinicalTables;

    fn statuses(evaluations: &[Evaluation]) -> Vec<(Marker, Status)> {
        evaluations.iter().map(|e| (e.marker, e.status)).collect()
    }

    #[test]
    fn classifies_against_reference_ranges() {
        let tables = ClinicalTables::embedded().unwrap();
        let evaluator = Evaluator::new(tables.reference());

        let input = MeasurementInput::new()
            .with("ヘモグロビン", 10.0)
            .with("AST", 60.0)
            .with("LDL Cholesterol", "100");
        let evaluations = evaluator.evaluate(&input).unwrap();

        assert_eq!(
            statuses(&evaluations),
            vec![
                (Marker::Hemoglobin, Status::Low),
                (Marker::LdlCholesterol, Status::Normal),
                (Marker::Ast, Status::High),
            ]
        );
        assert_eq!(evaluations[2].value, 60.0);
        assert_eq!(evaluations[2].reference_range, "13 - 33 U/L");
    }

    #[test]
    fn output_follows_canonical_order_not_input_order() {
        let tables = ClinicalTables::embedded().unwrap();
        let evaluator = Evaluator::new(tables.reference());
        let measurements = [
            Measurement::new(Marker::GammaGtp, 20.0),
            Measurement::new(Marker::Hemoglobin, 14.0),
            Measurement::new(Marker::Alt, 20.0),
        ];
        let markers: Vec<Marker> = evaluator
            .evaluate_measurements(&measurements)
            .unwrap()
            .iter()
            .map(|e| e.marker)
            .collect();
        assert_eq!(markers, vec![Marker::Hemoglobin, Marker::Alt, Marker::GammaGtp]);
    }

    #[test]
    fn rejects_duplicate_markers_via_aliases() {
        let tables = ClinicalTables::embedded().unwrap();
        let evaluator = Evaluator::new(tables.reference());
        let input = MeasurementInput::new().with("AST", 20.0).with("GOT", 21.0);
        assert_eq!(
            evaluator.evaluate(&input),
            Err(EngineError::DuplicateMarker {
                marker: "AST".to_string()
            })
        );
    }

    #[test]
    fn rejects_non_finite_measurements() {
        let tables = ClinicalTables::embedded().unwrap();
        let evaluator = Evaluator::new(tables.reference());
        let err = evaluator
            .evaluate_measurements(&[Measurement::new(Marker::Alt, f64::INFINITY)])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidValue { .. }));
    }
}
