//! Domain types and statistics for the bikeshare explorer.
//!
//! Holds the trip-record data model, the canonical month/day vocabularies,
//! the error taxonomy, the four descriptive-statistics routines and the
//! CLI settings layer. Nothing in this crate performs user-facing I/O.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;

pub use error::{ExplorerError, Result};
