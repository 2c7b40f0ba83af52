#![deny(unsafe_code)]

//! Versioned clinical tables: reference ranges per marker and the
//! marker-to-nutrient-to-food guidance used for recommendations.
//!
//! The tables are a data artifact, not code. A `manifest.toml` pins the table
//! version and the SHA-256 of every CSV file; the default copy is embedded in
//! the binary and an override directory can be supplied at runtime.

pub mod csv_utils;
pub mod embedded;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod nutrition;
pub mod paths;
pub mod reference;
pub mod registry;

pub use crate::error::StandardsError;
pub use crate::nutrition::NutrientMap;
pub use crate::paths::TABLES_ENV_VAR;
pub use crate::reference::ReferenceTable;
pub use crate::registry::{ClinicalTables, TablesSource, TablesSummary};
