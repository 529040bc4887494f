//! Main analysis pipeline for the bikeshare explorer.
//!
//! Orchestrates loading, temporal enrichment, filtering and the four
//! statistics routines, returning a [`CityAnalysis`] ready for the report
//! printer and the trip viewer.

use std::path::Path;

use bikeshare_core::models::{
    CityDataset, DemographicSummary, DurationStats, FilterSpec, StationStats, TimeStats, UserStats,
};
use bikeshare_core::stats;
use bikeshare_core::Result;
use chrono::Utc;

use crate::enricher;
use crate::filter;
use crate::reader::load_city;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Source file the dataset was loaded from.
    pub source: std::path::PathBuf,
    /// Records loaded before filtering.
    pub records_loaded: usize,
    /// Records retained by the filter.
    pub trips_selected: usize,
    /// Whether the source carried demographic columns.
    pub has_demographics: bool,
    /// Wall-clock seconds spent loading and enriching the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent in the four statistics routines.
    pub stats_time_seconds: f64,
}

/// The complete output of [`analyze_city`].
#[derive(Debug, Clone)]
pub struct CityAnalysis {
    /// The filtered dataset, kept for the raw-trip viewer.
    pub dataset: CityDataset,
    /// Post-filter record count (the "N trips selected" figure).
    pub trips_selected: usize,
    /// Popular travel times; `None` when the filtered set is empty.
    pub time_stats: Option<TimeStats>,
    /// Popular stations and route (all-`None` modes for an empty set).
    pub station_stats: StationStats,
    /// Duration aggregates; `None` when the filtered set is empty.
    pub duration_stats: Option<DurationStats>,
    /// User-type and demographic aggregates.
    pub user_stats: UserStats,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline for one city source.
///
/// 1. Load the CSV into a [`CityDataset`] and derive the temporal fields.
/// 2. Apply the month/day filter.
/// 3. Run the four independent statistics routines over the filtered set.
/// 4. Return a [`CityAnalysis`].
///
/// When the filter retains zero records the time and duration stats are
/// `None` and the user stats carry empty mappings with demographics marked
/// unavailable; an empty selection is a reportable outcome, not an error.
pub fn analyze_city(source: &Path, spec: &FilterSpec) -> Result<CityAnalysis> {
    // ── Step 1: Load and enrich ───────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let mut dataset = load_city(source)?;
    enricher::enrich(&mut dataset);
    let load_time = load_start.elapsed().as_secs_f64();
    let records_loaded = dataset.len();

    // ── Step 2: Filter ────────────────────────────────────────────────────────
    let (filtered, trips_selected) = filter::apply(&dataset, spec);

    // ── Step 3: Statistics ────────────────────────────────────────────────────
    let stats_start = std::time::Instant::now();
    let station_stats = stats::compute_station_stats(&filtered);
    let (time_stats, duration_stats, user_stats) = if filtered.is_empty() {
        let user_stats = UserStats {
            user_type_counts: Vec::new(),
            demographics: DemographicSummary::Unavailable,
        };
        (None, None, user_stats)
    } else {
        (
            Some(stats::compute_time_stats(&filtered)?),
            Some(stats::compute_duration_stats(&filtered)?),
            stats::compute_user_stats(&filtered)?,
        )
    };
    let stats_time = stats_start.elapsed().as_secs_f64();

    // ── Step 4: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: source.to_path_buf(),
        records_loaded,
        trips_selected,
        has_demographics: filtered.has_demographics,
        load_time_seconds: load_time,
        stats_time_seconds: stats_time,
    };

    Ok(CityAnalysis {
        dataset: filtered,
        trips_selected,
        time_stats,
        station_stats,
        duration_stats,
        user_stats,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
