//! Temporal enrichment: derive month, day-of-week and hour from each
//! record's start time.

use bikeshare_core::calendar;
use bikeshare_core::models::CityDataset;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Derive `(month, weekday name, hour)` from a start time.
///
/// Pure and deterministic; the timestamp is interpreted as given, with no
/// timezone conversion. The weekday name comes from the canonical lowercase
/// table in [`calendar::DAYS`].
pub fn derive_fields(start_time: NaiveDateTime) -> (u32, &'static str, u32) {
    let month = start_time.month();
    let day = calendar::DAYS[start_time.weekday().num_days_from_monday() as usize];
    let hour = start_time.hour();
    (month, day, hour)
}

/// Compute the derived fields for every record in the dataset.
pub fn enrich(dataset: &mut CityDataset) {
    for record in &mut dataset.records {
        let (month, day, hour) = derive_fields(record.start_time);
        record.month = month;
        record.day_of_week = day.to_string();
        record.hour = hour;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::TripRecord;
    use chrono::NaiveDate;

    fn timestamp(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    // ── derive_fields ─────────────────────────────────────────────────────────

    #[test]
    fn test_derive_fields_known_date() {
        // 2017-06-23 was a Friday.
        let (month, day, hour) = derive_fields(timestamp(2017, 6, 23, 15));
        assert_eq!(month, 6);
        assert_eq!(day, "friday");
        assert_eq!(hour, 15);
    }

    #[test]
    fn test_derive_fields_week_boundaries() {
        // 2017-01-01 was a Sunday; 2017-01-02 a Monday.
        let (_, sunday, _) = derive_fields(timestamp(2017, 1, 1, 0));
        let (_, monday, _) = derive_fields(timestamp(2017, 1, 2, 23));
        assert_eq!(sunday, "sunday");
        assert_eq!(monday, "monday");
    }

    #[test]
    fn test_derive_fields_hour_range() {
        let (_, _, midnight) = derive_fields(timestamp(2017, 3, 6, 0));
        let (_, _, last) = derive_fields(timestamp(2017, 3, 6, 23));
        assert_eq!(midnight, 0);
        assert_eq!(last, 23);
    }

    #[test]
    fn test_derive_fields_deterministic() {
        let ts = timestamp(2017, 4, 12, 9);
        assert_eq!(derive_fields(ts), derive_fields(ts));
    }

    // ── enrich ────────────────────────────────────────────────────────────────

    #[test]
    fn test_enrich_fills_every_record() {
        let record = |ts: NaiveDateTime| TripRecord {
            start_time: ts,
            duration_seconds: 100.0,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
            month: 0,
            day_of_week: String::new(),
            hour: 0,
        };

        let mut dataset = CityDataset {
            records: vec![
                record(timestamp(2017, 3, 6, 5)), // Monday
                record(timestamp(2017, 5, 2, 18)), // Tuesday
            ],
            has_demographics: false,
        };

        enrich(&mut dataset);

        assert_eq!(dataset.records[0].month, 3);
        assert_eq!(dataset.records[0].day_of_week, "monday");
        assert_eq!(dataset.records[0].hour, 5);
        assert_eq!(dataset.records[1].month, 5);
        assert_eq!(dataset.records[1].day_of_week, "tuesday");
        assert_eq!(dataset.records[1].hour, 18);
    }
}
