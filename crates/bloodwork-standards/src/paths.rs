//! Clinical tables directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the embedded clinical tables.
pub const TABLES_ENV_VAR: &str = "BLOODWORK_TABLES_DIR";

/// Directory named by `BLOODWORK_TABLES_DIR`, if set and non-empty.
///
/// When this returns `None` the tables compiled into the binary are used.
pub fn tables_dir_override() -> Option<PathBuf> {
    std::env::var_os(TABLES_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
