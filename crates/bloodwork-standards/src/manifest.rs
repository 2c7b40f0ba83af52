#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "bloodwork.clinical-tables";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

pub const ROLE_REFERENCE_RANGES: &str = "reference_ranges";
pub const ROLE_NUTRIENT_RULES: &str = "nutrient_rules";
pub const ROLE_NUTRIENT_FOODS: &str = "nutrient_foods";

/// Roles every manifest must list exactly once.
pub const REQUIRED_ROLES: &[&str] = &[
    ROLE_REFERENCE_RANGES,
    ROLE_NUTRIENT_RULES,
    ROLE_NUTRIENT_FOODS,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pins {
    /// Table release version, e.g. "2024.1".
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub role: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Manifest {
    pub fn file_for_role(&self, role: &str) -> Option<&ManifestFile> {
        self.files.iter().find(|file| file.role == role)
    }
}
