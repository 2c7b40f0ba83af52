use tracing::{info, info_span, warn};

use bloodwork_model::{AnalysisReport, Evaluation, MeasurementInput, RecommendationSet, Result};
use bloodwork_standards::ClinicalTables;

use crate::evaluator::Evaluator;
use crate::recommender::Recommender;

/// Evaluation and recommendation over one set of clinical tables.
///
/// Holds only a shared reference to immutable tables, so one engine can
/// serve any number of concurrent calls.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    tables: &'a ClinicalTables,
}

impl<'a> Engine<'a> {
    pub fn new(tables: &'a ClinicalTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a ClinicalTables {
        self.tables
    }

    pub fn evaluator(&self) -> Evaluator<'a> {
        Evaluator::new(self.tables.reference())
    }

    pub fn recommender(&self) -> Recommender<'a> {
        Recommender::new(self.tables.nutrition())
    }

    pub fn evaluate(&self, input: &MeasurementInput) -> Result<Vec<Evaluation>> {
        self.evaluator().evaluate(input)
    }

    pub fn recommend(&self, evaluations: &[Evaluation]) -> RecommendationSet {
        self.recommender().recommend(evaluations)
    }

    /// Evaluate the input and derive recommendations from the result.
    ///
    /// # Errors
    ///
    /// Fails with the evaluator's input validation error; recommendation
    /// itself cannot fail.
    pub fn analyze(&self, input: &MeasurementInput) -> Result<AnalysisReport> {
        let span = info_span!(
            "analyze",
            table_version = %self.tables.version(),
            input_count = input.len()
        );
        let _guard = span.enter();

        let analysis = match self.evaluate(input) {
            Ok(analysis) => analysis,
            Err(error) => {
                warn!(
                    kind = error.kind(),
                    marker = error.marker().unwrap_or("-"),
                    "rejected measurement input"
                );
                return Err(error);
            }
        };
        let recommendations = self.recommend(&analysis);
        let report = AnalysisReport {
            analysis,
            recommendations,
        };
        info!(
            marker_count = report.analysis.len(),
            high_count = report.high_count(),
            low_count = report.low_count(),
            nutrient_count = report.recommendations.len(),
            "analysis complete"
        );
        Ok(report)
    }
}
