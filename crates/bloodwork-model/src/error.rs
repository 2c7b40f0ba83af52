use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input validation failures. Any of these rejects the whole call; no
/// partial results are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no measurements supplied")]
    EmptyInput,
    #[error("unsupported marker: {name}")]
    UnsupportedMarker { name: String },
    #[error("invalid value for {marker}: {value}")]
    InvalidValue { marker: String, value: String },
    #[error("marker supplied more than once: {marker}")]
    DuplicateMarker { marker: String },
}

impl EngineError {
    /// Snake-case name of the variant. Carries no supplied value.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::EmptyInput => "empty_input",
            EngineError::UnsupportedMarker { .. } => "unsupported_marker",
            EngineError::InvalidValue { .. } => "invalid_value",
            EngineError::DuplicateMarker { .. } => "duplicate_marker",
        }
    }

    /// Canonical marker name for errors tied to a resolved marker.
    pub fn marker(&self) -> Option<&str> {
        match self {
            EngineError::InvalidValue { marker, .. } | EngineError::DuplicateMarker { marker } => {
                Some(marker.as_str())
            }
            EngineError::EmptyInput | EngineError::UnsupportedMarker { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    #[error("range has neither a lower nor an upper bound")]
    NoBounds,
    #[error("range bound is not finite: {bound}")]
    NonFinite { bound: f64 },
    #[error("lower bound {lower} exceeds upper bound {upper}")]
    Inverted { lower: f64, upper: f64 },
}

/// Failure body handed back to transport layers: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&EngineError> for ErrorPayload {
    fn from(error: &EngineError) -> Self {
        Self::new(error.to_string())
    }
}
