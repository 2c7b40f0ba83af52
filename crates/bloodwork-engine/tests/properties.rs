//! Boundary properties of marker classification over the embedded tables.

use bloodwork_engine::Engine;
use bloodwork_model::{Marker, MeasurementInput, ReferenceRange, Status};
use bloodwork_standards::ClinicalTables;
use proptest::prelude::*;

fn range(tables: &ClinicalTables, marker: Marker) -> ReferenceRange {
    tables
        .reference()
        .range_for(marker)
        .cloned()
        .expect("every marker has a range")
}

fn status_of(tables: &ClinicalTables, marker: Marker, value: f64) -> Status {
    let input = MeasurementInput::new().with(marker.as_str(), value);
    let report = Engine::new(tables).analyze(&input).expect("valid input");
    report.analysis[0].status
}

fn any_marker() -> impl Strategy<Value = Marker> {
    prop::sample::select(Marker::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn values_inside_range_are_normal(marker in any_marker(), t in 0.001f64..0.999, offset in 0.0f64..1e4) {
        let tables = ClinicalTables::embedded().unwrap();
        let range = range(&tables, marker);
        let value = match (range.lower, range.upper) {
            (Some(lower), Some(upper)) => lower + t * (upper - lower),
            (Some(lower), None) => lower + offset,
            (None, Some(upper)) => upper - offset,
            (None, None) => unreachable!("ranges have at least one bound"),
        };
        prop_assert_eq!(status_of(&tables, marker, value), Status::Normal);
    }

    #[test]
    fn upper_bound_is_inclusive(marker in any_marker(), epsilon in 1e-9f64..1e3) {
        let tables = ClinicalTables::embedded().unwrap();
        if let Some(upper) = range(&tables, marker).upper {
            prop_assert_eq!(status_of(&tables, marker, upper), Status::Normal);
            prop_assert_eq!(status_of(&tables, marker, upper + epsilon), Status::High);
        }
    }

    #[test]
    fn lower_bound_is_inclusive(marker in any_marker(), epsilon in 1e-9f64..1e3) {
        let tables = ClinicalTables::embedded().unwrap();
        if let Some(lower) = range(&tables, marker).lower {
            prop_assert_eq!(status_of(&tables, marker, lower), Status::Normal);
            prop_assert_eq!(status_of(&tables, marker, lower - epsilon), Status::Low);
        }
    }

    #[test]
    fn normal_values_never_produce_recommendations(marker in any_marker(), t in 0.0f64..=1.0) {
        let tables = ClinicalTables::embedded().unwrap();
        let range = range(&tables, marker);
        let lower = range.lower.unwrap_or(0.0);
        let upper = range.upper.unwrap_or(lower + 100.0);
        let value = (lower + t * (upper - lower)).clamp(lower, upper);
        let input = MeasurementInput::new().with(marker.code(), value);
        let report = Engine::new(&tables).analyze(&input).unwrap();
        prop_assert!(report.recommendations.is_empty());
    }
}
