//! Tests for bloodwork-model types.

use bloodwork_model::{
    AnalysisReport, AnalyzeRequest, ErrorPayload, Evaluation, InputValue, Marker,
    RecommendationSet, ReferenceRange, Status,
};

#[test]
fn request_accepts_numbers_and_strings() {
    let json = r#"{"data": {"AST": 60, "ヘモグロビン": "10.5", "ALT": ""}}"#;
    let request: AnalyzeRequest = serde_json::from_str(json).expect("deserialize request");
    let entries: Vec<(&str, &InputValue)> = request.data.iter().collect();
    assert_eq!(entries.len(), 3);

    let values: Vec<Option<f64>> = request.data.iter().map(|(_, v)| v.to_finite()).collect();
    // Keys are sorted: "ALT", "AST", "ヘモグロビン".
    assert_eq!(values, vec![None, Some(60.0), Some(10.5)]);
}

#[test]
fn request_rejects_null_values() {
    let json = r#"{"data": {"AST": null}}"#;
    assert!(serde_json::from_str::<AnalyzeRequest>(json).is_err());
}

#[test]
fn evaluation_serializes_with_canonical_names() {
    let range = ReferenceRange::new(Some(13.0), Some(33.0), "U/L").unwrap();
    let evaluation = Evaluation::new(Marker::Ast, 60.0, &range);
    let json = serde_json::to_value(&evaluation).expect("serialize evaluation");
    assert_eq!(
        json,
        serde_json::json!({
            "marker": "AST",
            "value": 60.0,
            "reference_range": "13 - 33 U/L",
            "unit": "U/L",
            "status": "high",
        })
    );
}

#[test]
fn marker_serde_uses_display_names() {
    let json = serde_json::to_string(&Marker::GammaGtp).unwrap();
    assert_eq!(json, "\"γ-GTP\"");
    let round: Marker = serde_json::from_str(&json).unwrap();
    assert_eq!(round, Marker::GammaGtp);
}

#[test]
fn recommendations_deduplicate_foods() {
    let mut set = RecommendationSet::new();
    set.add("Dietary Fiber", ["burdock root", "brown rice"]);
    set.add("Dietary Fiber", ["brown rice", "mushrooms"]);
    let foods: Vec<&str> = set
        .foods("Dietary Fiber")
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(foods, vec!["brown rice", "burdock root", "mushrooms"]);
    assert_eq!(set.len(), 1);
}

#[test]
fn empty_report_serializes_empty_mapping() {
    let report = AnalysisReport::default();
    let json = serde_json::to_string(&report).unwrap();
    assert_eq!(json, r#"{"analysis":[],"recommendations":{}}"#);
    assert!(report.is_all_normal());
}

#[test]
fn error_payload_shape() {
    let json = serde_json::to_string(&ErrorPayload::new("no measurements supplied")).unwrap();
    assert_eq!(json, r#"{"error":"no measurements supplied"}"#);
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Status::Low).unwrap(), "\"low\"");
    assert_eq!(Status::Low.to_string(), "Low");
}
