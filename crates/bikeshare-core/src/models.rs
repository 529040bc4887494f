use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::{ExplorerError, Result};

/// One bicycle rental event read from a city source file.
///
/// The three derived fields (`month`, `day_of_week`, `hour`) are computed
/// once from `start_time` by the temporal enricher after load; the loader
/// leaves them at their zero values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    /// When the rental started. Timezone-naive: interpreted as given.
    pub start_time: NaiveDateTime,
    /// Trip length in seconds, never negative.
    pub duration_seconds: f64,
    /// Station where the trip began.
    pub start_station: String,
    /// Station where the trip ended.
    pub end_station: String,
    /// Rider category, e.g. "Subscriber" or "Customer".
    pub user_type: String,
    /// Rider gender. `None` when the column is absent for this city or the
    /// row left it blank.
    #[serde(default)]
    pub gender: Option<String>,
    /// Rider birth year, same optionality rule as `gender`.
    #[serde(default)]
    pub birth_year: Option<i32>,
    /// Derived: calendar month of `start_time` (1–12).
    #[serde(default)]
    pub month: u32,
    /// Derived: lowercase full weekday name of `start_time`.
    #[serde(default)]
    pub day_of_week: String,
    /// Derived: hour-of-day of `start_time` (0–23).
    #[serde(default)]
    pub hour: u32,
}

/// An ordered sequence of trip records for one city.
///
/// `has_demographics` is a per-dataset schema property resolved from the
/// source's column set: when `false`, `gender` and `birth_year` are `None`
/// on every record, not evaluated per row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityDataset {
    /// The records, in source order.
    pub records: Vec<TripRecord>,
    /// Whether the source carried the Gender / Birth Year columns.
    pub has_demographics: bool,
}

impl CityDataset {
    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A validated month/day narrowing request.
///
/// Built from the user-facing `"all"`-or-name strings; construction is the
/// defensive vocabulary check, so a `FilterSpec` value is canonical by
/// construction and the filter itself never re-validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// 1-based month number to retain, or `None` for all months.
    pub month: Option<u32>,
    /// Canonical lowercase weekday name to retain, or `None` for all days.
    pub day: Option<String>,
}

impl FilterSpec {
    /// Build a spec from `"all"`-or-canonical-name strings (case-insensitive).
    ///
    /// Returns [`ExplorerError::InvalidFilter`] when either value is outside
    /// the fixed vocabulary.
    pub fn new(month: &str, day: &str) -> Result<Self> {
        let month = if month.eq_ignore_ascii_case(calendar::ALL) {
            None
        } else {
            Some(
                calendar::month_number(month)
                    .ok_or_else(|| ExplorerError::InvalidFilter(month.to_string()))?,
            )
        };

        let day = if day.eq_ignore_ascii_case(calendar::ALL) {
            None
        } else {
            let pos = calendar::day_position(day)
                .ok_or_else(|| ExplorerError::InvalidFilter(day.to_string()))?;
            Some(calendar::DAYS[pos].to_string())
        };

        Ok(Self { month, day })
    }

    /// A spec that retains every record.
    pub fn all() -> Self {
        Self {
            month: None,
            day: None,
        }
    }

    /// `true` when neither axis narrows the dataset.
    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

// ── Statistics results ────────────────────────────────────────────────────────

/// Most frequent travel times over a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStats {
    /// Most frequent month (1–12); ties break toward the smaller month.
    pub popular_month: u32,
    /// Most frequent weekday; ties break toward the earlier canonical day.
    pub popular_day: String,
    /// Most frequent start hour (0–23); ties break toward the smaller hour.
    pub popular_hour: u32,
}

/// A station (or route) name paired with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCount {
    pub name: String,
    pub count: usize,
}

/// A start/end station pair paired with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCount {
    pub start: String,
    pub end: String,
    pub count: usize,
}

/// Most popular stations and route over a dataset.
///
/// All three modes are `None` for an empty dataset; an empty input is valid
/// here, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStats {
    pub popular_start: Option<StationCount>,
    pub popular_end: Option<StationCount>,
    pub popular_route: Option<RouteCount>,
}

/// Total and mean trip duration over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    /// Sum of `duration_seconds` across all records.
    pub total_seconds: f64,
    /// Arithmetic mean of `duration_seconds`.
    pub mean_seconds: f64,
}

/// Birth-year aggregates over the non-missing values of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    /// Mode of the non-missing birth years; ties break toward first
    /// appearance in record order.
    pub most_common: i32,
}

/// Demographic aggregates, or an explicit marker that the city's source has
/// no demographic columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemographicSummary {
    /// The source has no Gender / Birth Year columns.
    Unavailable,
    /// Demographic aggregates for a source that carries the columns.
    Available {
        /// Gender → occurrence count, in first-appearance order. Rows with a
        /// blank gender land in an explicit "unspecified" bucket.
        gender_counts: Vec<(String, usize)>,
        birth_years: BirthYearStats,
    },
}

/// Rider-demographic aggregates over a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// User type → occurrence count, in first-appearance order.
    pub user_type_counts: Vec<(String, usize)>,
    pub demographics: DemographicSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── FilterSpec ─────────────────────────────────────────────────────────

    #[test]
    fn test_filter_spec_all_all() {
        let spec = FilterSpec::new("all", "all").unwrap();
        assert_eq!(spec, FilterSpec::all());
        assert!(spec.is_unfiltered());
    }

    #[test]
    fn test_filter_spec_month_resolves_to_number() {
        let spec = FilterSpec::new("march", "all").unwrap();
        assert_eq!(spec.month, Some(3));
        assert_eq!(spec.day, None);
    }

    #[test]
    fn test_filter_spec_day_canonicalised() {
        let spec = FilterSpec::new("all", "MONDAY").unwrap();
        assert_eq!(spec.day.as_deref(), Some("monday"));
    }

    #[test]
    fn test_filter_spec_rejects_unknown_month() {
        let err = FilterSpec::new("smarch", "all").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidFilter(v) if v == "smarch"));
    }

    #[test]
    fn test_filter_spec_rejects_unknown_day() {
        let err = FilterSpec::new("all", "someday").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidFilter(v) if v == "someday"));
    }

    #[test]
    fn test_filter_spec_case_insensitive_all() {
        let spec = FilterSpec::new("All", "ALL").unwrap();
        assert!(spec.is_unfiltered());
    }

    // ── CityDataset ────────────────────────────────────────────────────────

    #[test]
    fn test_city_dataset_len_and_empty() {
        let ds = CityDataset::default();
        assert_eq!(ds.len(), 0);
        assert!(ds.is_empty());
    }
}
