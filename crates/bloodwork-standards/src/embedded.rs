//! Embedded clinical tables.
//!
//! The default tables are embedded at compile time using `include_str!()`,
//! so the engine works without any files on disk. A directory with the same
//! layout can replace them at runtime (see [`crate::paths`]).

/// Manifest pinning the table version and file digests.
pub const MANIFEST: &str = include_str!("../data/manifest.toml");

/// Reference range per marker.
pub const REFERENCE_RANGES: &str = include_str!("../data/reference_ranges.csv");

/// (Marker, Status) to nutrient rules.
pub const NUTRIENT_RULES: &str = include_str!("../data/nutrient_rules.csv");

/// Foods rich in each nutrient.
pub const NUTRIENT_FOODS: &str = include_str!("../data/nutrient_foods.csv");

/// Get embedded content by manifest path.
pub fn file_for_path(path: &str) -> Option<&'static str> {
    match path {
        "reference_ranges.csv" => Some(REFERENCE_RANGES),
        "nutrient_rules.csv" => Some(NUTRIENT_RULES),
        "nutrient_foods.csv" => Some(NUTRIENT_FOODS),
        _ => None,
    }
}
