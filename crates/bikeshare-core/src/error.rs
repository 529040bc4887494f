use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// A city source file could not be opened or read from disk.
    #[error("Failed to read data source {path}: {source}")]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row in a city source file could not be parsed.
    ///
    /// `row` is the 1-based data-row number (the header row is not counted).
    #[error("Malformed record at row {row}: {detail}")]
    MalformedRecord { row: usize, detail: String },

    /// A required column is absent from the source header.
    #[error("Data source is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// An aggregation that needs at least one record was invoked on zero
    /// records. Carries the name of the statistic that was requested.
    #[error("Cannot compute {0} of an empty dataset")]
    EmptyDataset(&'static str),

    /// A filter value outside the canonical month/day vocabulary reached the
    /// core. The caller is expected to pre-validate, so this indicates a
    /// contract violation.
    #[error("Invalid filter value: {0}")]
    InvalidFilter(String),

    /// A city name has no entry in the caller-owned city table.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Pass-through for CSV decoding errors that do not map to a single row.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the explorer crates.
pub type Result<T> = std::result::Result<T, ExplorerError>;
