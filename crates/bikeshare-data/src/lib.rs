//! Data ingestion layer for the bikeshare explorer.
//!
//! Responsible for discovering and reading per-city CSV trip files,
//! deriving the temporal columns, applying month/day filters and running
//! the top-level analysis pipeline.

pub mod analysis;
pub mod enricher;
pub mod filter;
pub mod reader;

pub use bikeshare_core as core;
