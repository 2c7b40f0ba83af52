//! Assembling a [`MeasurementInput`] from CLI arguments.
//!
//! A request can come from a JSON body (`{"data": {...}}`, or a bare object
//! of measurements) read from a file or stdin, from repeated `-m NAME=VALUE`
//! flags, or both. Flag values win over body values with the same key.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::value::RawValue;
use tracing::debug;

use bloodwork_model::{InputValue, MeasurementInput};

use crate::logging::redact_value;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Parse one `NAME=VALUE` measurement flag.
///
/// The value is kept as text; numeric parsing belongs to the engine so that
/// a bad value is reported as an input error like any other.
pub fn parse_measurement_arg(arg: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing marker name in `{arg}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse a request body.
///
/// Accepts the transport envelope `{"data": {...}}` and, for convenience on
/// the command line, a bare measurement object.
pub fn parse_request(body: &str) -> Result<MeasurementInput> {
    let object: RawObject = serde_json::from_str(body).context("parse request JSON object")?;
    if object.len() == 1
        && let Some(data) = object.get("data")
    {
        let inner: RawObject =
            serde_json::from_str(data.get()).context("`data` must be an object of measurements")?;
        return Ok(measurements_from_raw(inner));
    }
    Ok(measurements_from_raw(object))
}

type RawObject = BTreeMap<String, Box<RawValue>>;

fn measurements_from_raw(object: RawObject) -> MeasurementInput {
    object
        .into_iter()
        .map(|(name, raw)| (name, input_value(&raw)))
        .collect()
}

/// JSON numbers and strings map directly. Any other value, including a
/// number outside the `f64` range, is kept as its source text and left for
/// the engine to reject as an invalid value.
fn input_value(raw: &RawValue) -> InputValue {
    serde_json::from_str(raw.get()).unwrap_or_else(|_| InputValue::Text(raw.get().to_string()))
}

/// Read a request body from `path`, or from stdin when `path` is `-`.
pub fn read_request(path: &Path) -> Result<MeasurementInput> {
    let body = if path.as_os_str() == STDIN_PATH {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("read request from stdin")?;
        body
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    parse_request(&body).with_context(|| format!("invalid request in {}", path.display()))
}

/// Merge the optional request body with `-m` pairs.
pub fn build_input(
    input: Option<&Path>,
    measurements: &[(String, String)],
) -> Result<MeasurementInput> {
    let mut merged = match input {
        Some(path) => read_request(path)?,
        None => MeasurementInput::new(),
    };
    for (name, value) in measurements {
        merged.insert(name.clone(), value.clone());
    }
    for (name, value) in merged.iter() {
        let rendered = value.to_string();
        debug!(marker = name, value = redact_value(&rendered), "measurement supplied");
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodwork_engine::Engine;
    use bloodwork_model::EngineError;
    use bloodwork_standards::ClinicalTables;

    #[test]
    fn measurement_arg_splits_on_first_equals() {
        assert_eq!(
            parse_measurement_arg(" AST = 60 "),
            Ok(("AST".to_string(), "60".to_string()))
        );
        assert_eq!(
            parse_measurement_arg("x=1=2"),
            Ok(("x".to_string(), "1=2".to_string()))
        );
    }

    #[test]
    fn measurement_arg_errors() {
        assert!(parse_measurement_arg("AST").is_err());
        assert!(parse_measurement_arg("=60").is_err());
    }

    #[test]
    fn request_accepts_envelope_and_bare_object() {
        let wrapped = parse_request(r#"{"data": {"AST": 60, "ALT": "20"}}"#).unwrap();
        let bare = parse_request(r#"{"AST": 60, "ALT": "20"}"#).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.len(), 2);
    }

    #[test]
    fn marker_named_data_is_not_an_envelope() {
        let input = parse_request(r#"{"data": 5, "AST": 1}"#).unwrap();
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn data_envelope_must_hold_an_object() {
        assert!(parse_request(r#"{"data": 5}"#).is_err());
        assert!(parse_request("[1, 2]").is_err());
    }

    #[test]
    fn unrepresentable_values_reach_the_engine_as_text() {
        let input = parse_request(r#"{"AST": 1e400, "ALT": true, "GGT": null}"#).unwrap();
        let values: Vec<(&str, &InputValue)> = input.iter().collect();
        assert_eq!(
            values,
            vec![
                ("ALT", &InputValue::Text("true".to_string())),
                ("AST", &InputValue::Text("1e400".to_string())),
                ("GGT", &InputValue::Text("null".to_string())),
            ]
        );
    }

    #[test]
    fn out_of_range_number_is_an_invalid_value() {
        let tables = ClinicalTables::embedded().unwrap();
        let input = parse_request(r#"{"data": {"AST": 1e400}}"#).unwrap();
        let err = Engine::new(&tables).analyze(&input).unwrap_err();
        assert!(
            matches!(&err, EngineError::InvalidValue { marker, .. } if marker == "AST"),
            "{err}"
        );
    }

    #[test]
    fn flags_override_body_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"data": {"AST": 60, "ALT": 20}}"#).unwrap();

        let input = build_input(Some(&path), &[("AST".to_string(), "30".to_string())]).unwrap();
        let values: Vec<(&str, &InputValue)> = input.iter().collect();
        assert_eq!(
            values,
            vec![
                ("ALT", &InputValue::Number(20.0)),
                ("AST", &InputValue::Text("30".to_string())),
            ]
        );
    }

    #[test]
    fn missing_file_has_context() {
        let err = build_input(Some(Path::new("/nonexistent/request.json")), &[]).unwrap_err();
        assert!(err.to_string().contains("read /nonexistent/request.json"));
    }
}
