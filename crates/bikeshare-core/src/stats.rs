//! The four descriptive-statistics routines.
//!
//! Each routine is a stateless scan over a read-only [`CityDataset`]; none
//! depends on another's output. Mode tie-breaking is pinned here: numeric
//! fields (month, hour) and the weekday break ties toward the earlier
//! canonical position, string-keyed fields break toward first appearance in
//! record order.

use crate::calendar;
use crate::error::{ExplorerError, Result};
use crate::models::{
    BirthYearStats, CityDataset, DemographicSummary, DurationStats, RouteCount, StationCount,
    StationStats, TimeStats, UserStats,
};

// ── Shared counting helpers ───────────────────────────────────────────────────

/// Count occurrences, preserving first-appearance order of the keys.
///
/// Linear-scan lookup is deliberate: every caller has small key cardinality
/// (user types, genders, stations) relative to the record count.
fn tally_in_order<K, I>(items: I) -> Vec<(K, usize)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        if let Some(entry) = counts.iter_mut().find(|(k, _)| *k == item) {
            entry.1 += 1;
        } else {
            counts.push((item, 1));
        }
    }
    counts
}

/// The entry with the highest count. Strictly-greater comparison keeps the
/// earliest entry on ties, which is first-appearance order for tallies built
/// by [`tally_in_order`].
fn mode_entry<K>(counts: &[(K, usize)]) -> Option<&(K, usize)> {
    let mut best: Option<&(K, usize)> = None;
    for entry in counts {
        match best {
            Some(b) if entry.1 <= b.1 => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Index of the largest bucket; ties keep the lowest index.
fn peak_index(buckets: &[usize]) -> usize {
    let mut best = 0;
    for (i, &count) in buckets.iter().enumerate() {
        if count > buckets[best] {
            best = i;
        }
    }
    best
}

// ── Time-of-travel statistics ─────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
///
/// Counts into fixed-size buckets scanned in canonical order, so ties break
/// toward the smaller month/hour and the earlier monday-first weekday.
/// Fails with [`ExplorerError::EmptyDataset`] on zero records: the mode of
/// an empty collection is undefined.
pub fn compute_time_stats(dataset: &CityDataset) -> Result<TimeStats> {
    if dataset.is_empty() {
        return Err(ExplorerError::EmptyDataset("popular travel times"));
    }

    let mut month_buckets = [0usize; 12];
    let mut day_buckets = [0usize; 7];
    let mut hour_buckets = [0usize; 24];

    for record in &dataset.records {
        if (1..=12).contains(&record.month) {
            month_buckets[(record.month - 1) as usize] += 1;
        }
        if let Some(pos) = calendar::day_position(&record.day_of_week) {
            day_buckets[pos] += 1;
        }
        if record.hour < 24 {
            hour_buckets[record.hour as usize] += 1;
        }
    }

    Ok(TimeStats {
        popular_month: (peak_index(&month_buckets) + 1) as u32,
        popular_day: calendar::DAYS[peak_index(&day_buckets)].to_string(),
        popular_hour: peak_index(&hour_buckets) as u32,
    })
}

// ── Station statistics ────────────────────────────────────────────────────────

/// Most popular start station, end station and start/end route, each with
/// its occurrence count.
///
/// The three modes are independent. An empty dataset yields all-`None`
/// modes rather than an error.
pub fn compute_station_stats(dataset: &CityDataset) -> StationStats {
    let start_counts = tally_in_order(dataset.records.iter().map(|r| r.start_station.as_str()));
    let end_counts = tally_in_order(dataset.records.iter().map(|r| r.end_station.as_str()));
    let route_counts = tally_in_order(
        dataset
            .records
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    );

    StationStats {
        popular_start: mode_entry(&start_counts).map(|(name, count)| StationCount {
            name: (*name).to_string(),
            count: *count,
        }),
        popular_end: mode_entry(&end_counts).map(|(name, count)| StationCount {
            name: (*name).to_string(),
            count: *count,
        }),
        popular_route: mode_entry(&route_counts).map(|((start, end), count)| RouteCount {
            start: (*start).to_string(),
            end: (*end).to_string(),
            count: *count,
        }),
    }
}

// ── Duration statistics ───────────────────────────────────────────────────────

/// Total and mean trip duration in seconds.
///
/// Fails with [`ExplorerError::EmptyDataset`] on zero records; the mean of
/// an empty set is never silently produced as a division by zero.
pub fn compute_duration_stats(dataset: &CityDataset) -> Result<DurationStats> {
    if dataset.is_empty() {
        return Err(ExplorerError::EmptyDataset("mean trip duration"));
    }

    let total_seconds: f64 = dataset.records.iter().map(|r| r.duration_seconds).sum();
    let mean_seconds = total_seconds / dataset.len() as f64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
    })
}

// ── User statistics ───────────────────────────────────────────────────────────

/// Counts of user types, and demographic aggregates when the dataset's
/// schema carries them.
///
/// `user_type_counts` is an empty mapping for an empty dataset, never an
/// error. Rows with a blank gender land in an explicit "unspecified"
/// bucket: presence of the column does not guarantee every row is
/// populated. Fails with [`ExplorerError::EmptyDataset`] only when the
/// schema has demographic columns but no record carries a birth year.
pub fn compute_user_stats(dataset: &CityDataset) -> Result<UserStats> {
    let user_type_counts = tally_in_order(dataset.records.iter().map(|r| r.user_type.clone()));

    let demographics = if dataset.has_demographics {
        let gender_counts = tally_in_order(dataset.records.iter().map(|r| {
            r.gender
                .clone()
                .unwrap_or_else(|| "unspecified".to_string())
        }));

        let years: Vec<i32> = dataset.records.iter().filter_map(|r| r.birth_year).collect();
        if years.is_empty() {
            return Err(ExplorerError::EmptyDataset("birth-year statistics"));
        }

        let mut earliest = years[0];
        let mut latest = years[0];
        for &year in &years {
            earliest = earliest.min(year);
            latest = latest.max(year);
        }

        let year_counts = tally_in_order(years.iter().copied());
        let most_common = mode_entry(&year_counts).map(|(y, _)| *y).unwrap_or(years[0]);

        DemographicSummary::Available {
            gender_counts,
            birth_years: BirthYearStats {
                earliest,
                latest,
                most_common,
            },
        }
    } else {
        DemographicSummary::Unavailable
    };

    Ok(UserStats {
        user_type_counts,
        demographics,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
