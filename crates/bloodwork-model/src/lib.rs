//! Domain types shared by the engine, the table loaders and transports.

#![deny(unsafe_code)]

pub mod analysis;
pub mod enums;
pub mod error;
pub mod measurement;
pub mod range;

pub use analysis::{AnalysisReport, Evaluation, RecommendationSet};
pub use enums::{Marker, Status};
pub use error::{EngineError, ErrorPayload, RangeError, Result};
pub use measurement::{AnalyzeRequest, InputValue, Measurement, MeasurementInput};
pub use range::ReferenceRange;
