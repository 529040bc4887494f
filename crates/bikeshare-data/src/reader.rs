//! CSV file discovery and loading for the bikeshare explorer.
//!
//! Reads per-city trip files into [`CityDataset`] values for downstream
//! processing. The demographic schema flag is resolved by inspecting the
//! column set of each file, never from a fixed per-city lookup, so any
//! future city file with or without demographic columns loads correctly.

use std::path::{Path, PathBuf};

use bikeshare_core::error::{ExplorerError, Result};
use bikeshare_core::models::{CityDataset, TripRecord};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_dir`, sorted by path.
pub fn find_city_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Data directory does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load a city source file into a [`CityDataset`].
///
/// The header row decides the schema: the five trip columns are required
/// (missing one is [`ExplorerError::MissingColumn`]) and the presence of
/// both `Gender` and `Birth Year` sets the dataset's demographic flag.
/// Any extra columns (the leading record counter, `End Time`, ...) are
/// ignored.
///
/// Load policy is strict: a row whose start time cannot be parsed, whose
/// duration is non-numeric or negative, or whose station fields are blank
/// fails the whole load with [`ExplorerError::MalformedRecord`] carrying
/// the 1-based data-row number. Blank or non-numeric `Gender` / `Birth
/// Year` values are per-row missing data, not errors.
///
/// The derived temporal fields are left at their zero values; callers run
/// the enricher after load. The file handle is dropped on every exit path.
pub fn load_city(path: &Path) -> Result<CityDataset> {
    let file = std::fs::File::open(path).map_err(|source| ExplorerError::DataSource {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(ExplorerError::MissingColumn(name))
    };

    let start_time_col = column("Start Time")?;
    let duration_col = column("Trip Duration")?;
    let start_station_col = column("Start Station")?;
    let end_station_col = column("End Station")?;
    let user_type_col = column("User Type")?;

    let gender_col = headers.iter().position(|h| h == "Gender");
    let birth_year_col = headers.iter().position(|h| h == "Birth Year");
    let has_demographics = gender_col.is_some() && birth_year_col.is_some();

    let mut records: Vec<TripRecord> = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result?;

        let start_raw = record.get(start_time_col).unwrap_or("");
        let start_time = parse_start_time(start_raw).ok_or_else(|| {
            ExplorerError::MalformedRecord {
                row,
                detail: format!("unparseable start time '{}'", start_raw),
            }
        })?;

        let duration_raw = record.get(duration_col).unwrap_or("");
        let duration_seconds: f64 =
            duration_raw
                .trim()
                .parse()
                .map_err(|_| ExplorerError::MalformedRecord {
                    row,
                    detail: format!("non-numeric trip duration '{}'", duration_raw),
                })?;
        if duration_seconds < 0.0 {
            return Err(ExplorerError::MalformedRecord {
                row,
                detail: format!("negative trip duration {}", duration_seconds),
            });
        }

        let start_station = required_field(&record, start_station_col, "start station", row)?;
        let end_station = required_field(&record, end_station_col, "end station", row)?;
        let user_type = record.get(user_type_col).unwrap_or("").trim().to_string();

        let gender = gender_col
            .and_then(|c| record.get(c))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let birth_year = birth_year_col
            .and_then(|c| record.get(c))
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map(|v| v as i32);

        records.push(TripRecord {
            start_time,
            duration_seconds,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
            month: 0,
            day_of_week: String::new(),
            hour: 0,
        });
    }

    debug!(
        "Loaded {} records from {} (demographics: {})",
        records.len(),
        path.display(),
        has_demographics,
    );

    Ok(CityDataset {
        records,
        has_demographics,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse the source's start-time text as a naive (timezone-less) datetime.
///
/// The shipped files use `YYYY-MM-DD HH:MM:SS`; the `T`-separated and
/// fractional-second variants are accepted as well.
fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    const FMTS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    FMTS.iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Fetch a required string field, failing the load when it is blank.
fn required_field(
    record: &csv::StringRecord,
    col: usize,
    what: &str,
    row: usize,
) -> Result<String> {
    let value = record.get(col).unwrap_or("").trim();
    if value.is_empty() {
        return Err(ExplorerError::MalformedRecord {
            row,
            detail: format!("missing {}", what),
        });
    }
    Ok(value.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const FULL_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
    const BARE_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

    fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", header).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    // ── load_city ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_city_full_schema() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &[
                "0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0",
                "1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610.0,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0",
            ],
        );

        let dataset = load_city(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.has_demographics);

        let first = &dataset.records[0];
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.end_station, "Damen Ave & Chicago Ave");
        assert_eq!(first.user_type, "Subscriber");
        assert!((first.duration_seconds - 321.0).abs() < f64::EPSILON);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
    }

    #[test]
    fn test_load_city_without_demographic_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "washington.csv",
            BARE_HEADER,
            &["0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.1,14th & Belmont St NW,15th & K St NW,Subscriber"],
        );

        let dataset = load_city(&path).unwrap();
        assert!(!dataset.has_demographics);
        assert_eq!(dataset.records[0].gender, None);
        assert_eq!(dataset.records[0].birth_year, None);
    }

    #[test]
    fn test_load_city_blank_demographic_values_are_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &["0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,A,B,Customer,,"],
        );

        let dataset = load_city(&path).unwrap();
        assert!(dataset.has_demographics, "schema flag is per-file, not per-row");
        assert_eq!(dataset.records[0].gender, None);
        assert_eq!(dataset.records[0].birth_year, None);
    }

    #[test]
    fn test_load_city_missing_file_is_data_source_error() {
        let err = load_city(Path::new("/tmp/does-not-exist-bikeshare-test.csv")).unwrap_err();
        assert!(matches!(err, ExplorerError::DataSource { .. }));
    }

    #[test]
    fn test_load_city_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "broken.csv",
            ",Start Time,Trip Duration,End Station,User Type",
            &[],
        );

        let err = load_city(&path).unwrap_err();
        assert!(matches!(
            err,
            ExplorerError::MissingColumn("Start Station")
        ));
    }

    #[test]
    fn test_load_city_bad_timestamp_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &[
                "0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,A,B,Subscriber,Male,1992.0",
                "1,not-a-date,2017-06-23 15:14:53,60.0,A,B,Subscriber,Male,1992.0",
            ],
        );

        let err = load_city(&path).unwrap_err();
        match err {
            ExplorerError::MalformedRecord { row, detail } => {
                assert_eq!(row, 2);
                assert!(detail.contains("not-a-date"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_city_negative_duration_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &["0,2017-06-23 15:09:32,2017-06-23 15:14:53,-5.0,A,B,Subscriber,Male,1992.0"],
        );

        let err = load_city(&path).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedRecord { row: 1, .. }));
    }

    #[test]
    fn test_load_city_blank_station_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &["0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,,B,Subscriber,Male,1992.0"],
        );

        let err = load_city(&path).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedRecord { row: 1, .. }));
    }

    #[test]
    fn test_load_city_derived_fields_left_unset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            FULL_HEADER,
            &["0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,A,B,Subscriber,Male,1992.0"],
        );

        let dataset = load_city(&path).unwrap();
        assert_eq!(dataset.records[0].month, 0);
        assert_eq!(dataset.records[0].day_of_week, "");
    }

    // ── parse_start_time ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_start_time_formats() {
        assert!(parse_start_time("2017-06-23 15:09:32").is_some());
        assert!(parse_start_time("2017-06-23T15:09:32").is_some());
        assert!(parse_start_time("2017-06-23 15:09:32.500").is_some());
        assert!(parse_start_time("").is_none());
        assert!(parse_start_time("06/23/2017 15:09").is_none());
    }

    // ── find_city_files ───────────────────────────────────────────────────────

    #[test]
    fn test_find_city_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "washington.csv", BARE_HEADER, &[]);
        write_csv(dir.path(), "chicago.csv", FULL_HEADER, &[]);
        write_csv(dir.path(), "new_york_city.csv", FULL_HEADER, &[]);

        let files = find_city_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["chicago.csv", "new_york_city.csv", "washington.csv"]
        );
    }

    #[test]
    fn test_find_city_files_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "chicago.csv", FULL_HEADER, &[]);
        std::fs::write(dir.path().join("notes.txt"), "not a city file").unwrap();

        let files = find_city_files(dir.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_city_files_nonexistent_dir() {
        let files = find_city_files(Path::new("/tmp/does-not-exist-bikeshare-xyz"));
        assert!(files.is_empty());
    }
}
