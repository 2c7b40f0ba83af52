#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::hash::{sha256_hex, sha256_hex_all};
use crate::manifest::{
    MANIFEST_FILE, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile,
    REQUIRED_ROLES, ROLE_NUTRIENT_FOODS, ROLE_NUTRIENT_RULES, ROLE_REFERENCE_RANGES,
};
use crate::nutrition::NutrientMap;
use crate::paths::tables_dir_override;
use crate::reference::ReferenceTable;

/// Where a set of clinical tables was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablesSource {
    Embedded,
    Directory(PathBuf),
}

impl fmt::Display for TablesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablesSource::Embedded => write!(f, "embedded"),
            TablesSource::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TablesSummary {
    pub version: String,
    pub fingerprint: String,
    pub source: String,
    pub marker_count: usize,
    pub rule_count: usize,
    pub nutrient_count: usize,
    pub food_count: usize,
}

/// The complete, verified table artifact the engine evaluates against.
///
/// Immutable once loaded; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct ClinicalTables {
    pub manifest: Manifest,
    pub source: TablesSource,
    reference: ReferenceTable,
    nutrition: NutrientMap,
    fingerprint: String,
}

/// Raw file content for one manifest role.
struct RoleContent {
    path: PathBuf,
    content: String,
}

impl ClinicalTables {
    /// Load the tables compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let manifest_path = PathBuf::from("<embedded>").join(MANIFEST_FILE);
        let manifest = parse_manifest(embedded::MANIFEST, &manifest_path)?;
        validate_manifest(&manifest)?;

        let read = |role: &str| -> Result<RoleContent> {
            let file = role_file(&manifest, role)?;
            let path = PathBuf::from("<embedded>").join(&file.path);
            let content = embedded::file_for_path(&file.path)
                .ok_or_else(|| StandardsError::MissingFile { path: path.clone() })?;
            verify_digest(&path, content.as_bytes(), &file.sha256)?;
            Ok(RoleContent {
                path,
                content: content.to_string(),
            })
        };
        let reference = read(ROLE_REFERENCE_RANGES)?;
        let rules = read(ROLE_NUTRIENT_RULES)?;
        let foods = read(ROLE_NUTRIENT_FOODS)?;

        Self::build(manifest, TablesSource::Embedded, &reference, &rules, &foods)
    }

    /// Load and verify tables from a directory holding `manifest.toml` and
    /// the files it lists.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_text = std::fs::read_to_string(&manifest_path)
            .map_err(|e| StandardsError::io(&manifest_path, e))?;
        let manifest = parse_manifest(&manifest_text, &manifest_path)?;
        validate_manifest(&manifest)?;

        let read = |role: &str| -> Result<RoleContent> {
            let file = role_file(&manifest, role)?;
            let path = dir.join(&file.path);
            let bytes = std::fs::read(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    StandardsError::MissingFile { path: path.clone() }
                } else {
                    StandardsError::io(path.clone(), e)
                }
            })?;
            verify_digest(&path, &bytes, &file.sha256)?;
            let content = String::from_utf8(bytes).map_err(|e| StandardsError::Csv {
                path: path.clone(),
                message: e.to_string(),
            })?;
            Ok(RoleContent { path, content })
        };
        let reference = read(ROLE_REFERENCE_RANGES)?;
        let rules = read(ROLE_NUTRIENT_RULES)?;
        let foods = read(ROLE_NUTRIENT_FOODS)?;

        Self::build(
            manifest,
            TablesSource::Directory(dir.to_path_buf()),
            &reference,
            &rules,
            &foods,
        )
    }

    /// Load from `dir` when given, else from `BLOODWORK_TABLES_DIR`, else the
    /// embedded copy.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir.map(Path::to_path_buf).or_else(tables_dir_override) {
            Some(dir) => Self::from_dir(&dir),
            None => Self::embedded(),
        }
    }

    fn build(
        manifest: Manifest,
        source: TablesSource,
        reference: &RoleContent,
        rules: &RoleContent,
        foods: &RoleContent,
    ) -> Result<Self> {
        let fingerprint = sha256_hex_all([
            reference.content.as_bytes(),
            rules.content.as_bytes(),
            foods.content.as_bytes(),
        ]);
        let reference_table = ReferenceTable::from_csv_str(&reference.content, &reference.path)?;
        let nutrition = NutrientMap::from_csv_str(
            &rules.content,
            &rules.path,
            &foods.content,
            &foods.path,
        )?;
        Ok(Self {
            manifest,
            source,
            reference: reference_table,
            nutrition,
            fingerprint,
        })
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    pub fn nutrition(&self) -> &NutrientMap {
        &self.nutrition
    }

    pub fn version(&self) -> &str {
        &self.manifest.pins.version
    }

    /// SHA-256 over the reference, rule and food tables, in that order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn summary(&self) -> TablesSummary {
        TablesSummary {
            version: self.version().to_string(),
            fingerprint: self.fingerprint.clone(),
            source: self.source.to_string(),
            marker_count: self.reference.len(),
            rule_count: self.nutrition.rule_count(),
            nutrient_count: self.nutrition.nutrient_count(),
            food_count: self.nutrition.food_count(),
        }
    }
}

fn parse_manifest(contents: &str, path: &Path) -> Result<Manifest> {
    toml::from_str(contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }
    if manifest.pins.version.trim().is_empty() {
        return Err(StandardsError::InvalidManifest {
            message: "empty table version pin".to_string(),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        validate_sha(&file.sha256, &file.path)?;
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(StandardsError::MissingRole {
                role: role.to_string(),
            });
        }
    }
    Ok(())
}

fn role_file<'a>(manifest: &'a Manifest, role: &str) -> Result<&'a ManifestFile> {
    manifest
        .file_for_role(role)
        .ok_or_else(|| StandardsError::MissingRole {
            role: role.to_string(),
        })
}

fn validate_sha(sha: &str, path: &str) -> Result<()> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "expected 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<()> {
    let candidate = Path::new(path);
    let escapes = candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(StandardsError::InvalidPath {
            path: candidate.to_path_buf(),
            message: "must be a relative path inside the tables directory".to_string(),
        });
    }
    Ok(())
}

fn verify_digest(path: &Path, bytes: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    let expected = expected.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}
