//! The fixed table of known cities and their source file names.
//!
//! This table is owned by the CLI layer: the core crates never validate
//! city names, they only receive an already-resolved file path.

use bikeshare_core::error::{ExplorerError, Result};

/// City name → CSV file name for the shipped datasets.
pub const CITY_DATA: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// The known city names, in table order.
pub fn city_names() -> Vec<&'static str> {
    CITY_DATA.iter().map(|(name, _)| *name).collect()
}

/// Resolve a city name (case-insensitive) to its source file name.
pub fn city_file(city: &str) -> Result<&'static str> {
    let lower = city.to_lowercase();
    CITY_DATA
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, file)| *file)
        .ok_or_else(|| ExplorerError::UnknownCity(city.to_string()))
}
