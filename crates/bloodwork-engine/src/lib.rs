//! Blood-test evaluation and dietary recommendation engine.
//!
//! The engine is a pure function of the clinical tables and one input
//! snapshot:
//!
//! 1. [`Evaluator`] validates the input and classifies each measurement as
//!    High, Low, or Normal against the reference table.
//! 2. [`Recommender`] maps each High/Low marker to nutrients and merges the
//!    foods rich in them.
//! 3. [`Engine::analyze`] runs both and returns an [`AnalysisReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use bloodwork_engine::Engine;
//! use bloodwork_model::MeasurementInput;
//! use bloodwork_standards::ClinicalTables;
//!
//! let tables = ClinicalTables::embedded()?;
//! let engine = Engine::new(&tables);
//! let report = engine.analyze(&MeasurementInput::new().with("AST", 60.0))?;
//! ```
//!
//! [`AnalysisReport`]: bloodwork_model::AnalysisReport

#![deny(unsafe_code)]

pub mod engine;
pub mod evaluator;
pub mod recommender;

pub use engine::Engine;
pub use evaluator::Evaluator;
pub use recommender::Recommender;
