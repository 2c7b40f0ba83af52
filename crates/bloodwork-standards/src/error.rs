#![deny(unsafe_code)]

use std::path::PathBuf;

use bloodwork_model::{Marker, RangeError};

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("missing required role in manifest: {role}")]
    MissingRole { role: String },

    #[error("duplicate role in manifest: {role}")]
    DuplicateRole { role: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("missing file listed in manifest: {path}")]
    MissingFile { path: PathBuf },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("{path}:{line}: {message}")]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("{path}:{line}: unknown marker '{name}'")]
    UnknownMarker {
        path: PathBuf,
        line: u64,
        name: String,
    },

    #[error("{path}: invalid reference range for {marker}: {source}")]
    InvalidRange {
        path: PathBuf,
        marker: Marker,
        #[source]
        source: RangeError,
    },

    #[error("reference table has no range for {marker}")]
    MissingMarker { marker: Marker },

    #[error("nutrient '{nutrient}' is recommended by a rule but has no foods")]
    UnknownNutrient { nutrient: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn row(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
