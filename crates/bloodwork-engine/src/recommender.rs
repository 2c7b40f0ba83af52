//! Nutrient recommendations for out-of-range markers.

use tracing::debug;

use bloodwork_model::{Evaluation, RecommendationSet};
use bloodwork_standards::NutrientMap;

#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    nutrition: &'a NutrientMap,
}

impl<'a> Recommender<'a> {
    pub fn new(nutrition: &'a NutrientMap) -> Self {
        Self { nutrition }
    }

    /// Merge the nutrient guidance of every High or Low evaluation.
    ///
    /// Normal evaluations and (Marker, Status) pairs without guidance
    /// contribute nothing. Foods are deduplicated per nutrient. The result is
    /// empty, never absent, when nothing applies.
    pub fn recommend(&self, evaluations: &[Evaluation]) -> RecommendationSet {
        let mut recommendations = RecommendationSet::new();
        for evaluation in evaluations.iter().filter(|e| e.is_abnormal()) {
            let nutrients = self
                .nutrition
                .nutrients_for(evaluation.marker, evaluation.status);
            if nutrients.is_empty() {
                debug!(
                    marker = %evaluation.marker,
                    status = %evaluation.status,
                    "no nutrient guidance"
                );
                continue;
            }
            for nutrient in nutrients {
                recommendations.add(
                    nutrient,
                    self.nutrition.foods_for(nutrient).iter().map(String::as_str),
                );
            }
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodwork_model::{Marker, ReferenceRange};
    use std::path::Path;

    fn nutrition() -> NutrientMap {
        let rules = "Marker,Status,Nutrient\n\
                     Total Cholesterol,High,Dietary Fiber\n\
                     LDL Cholesterol,High,Dietary Fiber\n\
                     LDL Cholesterol,High,Omega-3 Fatty Acids\n";
        let foods = "Nutrient,Food\n\
                     Dietary Fiber,brown rice\n\
                     Dietary Fiber,seaweed\n\
                     Omega-3 Fatty Acids,mackerel\n";
        NutrientMap::from_csv_str(rules, Path::new("r.csv"), foods, Path::new("f.csv")).unwrap()
    }

    fn evaluation(marker: Marker, value: f64) -> Evaluation {
        let range = ReferenceRange::new(Some(100.0), Some(200.0), "mg/dL").unwrap();
        Evaluation::new(marker, value, &range)
    }

    #[test]
    fn merges_and_deduplicates_across_markers() {
        let nutrition = nutrition();
        let recommender = Recommender::new(&nutrition);
        let set = recommender.recommend(&[
            evaluation(Marker::TotalCholesterol, 250.0),
            evaluation(Marker::LdlCholesterol, 250.0),
        ]);

        let fiber: Vec<&str> = set
            .foods("Dietary Fiber")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(fiber, vec!["brown rice", "seaweed"]);
        assert!(set.contains_nutrient("Omega-3 Fatty Acids"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn status_must_match_rule() {
        let nutrition = nutrition();
        let recommender = Recommender::new(&nutrition);
        // Low total cholesterol has no guidance; only High does.
        let set = recommender.recommend(&[evaluation(Marker::TotalCholesterol, 50.0)]);
        assert!(set.is_empty());
    }
}
