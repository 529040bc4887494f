//! Month / day-of-week narrowing of an enriched dataset.

use bikeshare_core::models::{CityDataset, FilterSpec, TripRecord};
use tracing::debug;

/// Narrow `dataset` to the records matching `spec`, returning the new
/// dataset together with the retained-record count (used for the caller's
/// "N trips selected" report).
///
/// Both axes compose with logical AND. The source dataset is never
/// mutated, and an empty result is valid output, not an error. `spec` is
/// canonical by construction ([`FilterSpec::new`] is the vocabulary
/// check), so no validation happens here.
pub fn apply(dataset: &CityDataset, spec: &FilterSpec) -> (CityDataset, usize) {
    let records: Vec<TripRecord> = dataset
        .records
        .iter()
        .filter(|record| matches(record, spec))
        .cloned()
        .collect();
    let retained = records.len();

    debug!(
        "Filter {:?} retained {} of {} records",
        spec,
        retained,
        dataset.len()
    );

    (
        CityDataset {
            records,
            has_demographics: dataset.has_demographics,
        },
        retained,
    )
}

/// AND of the month and day predicates; an unset axis always matches.
fn matches(record: &TripRecord, spec: &FilterSpec) -> bool {
    if let Some(month) = spec.month {
        if record.month != month {
            return false;
        }
    }
    if let Some(day) = &spec.day {
        if !record.day_of_week.eq_ignore_ascii_case(day) {
            return false;
        }
    }
    true
}
