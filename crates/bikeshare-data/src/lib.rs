//! Data layer for the bikeshare explorer.
//!
//! Loads a city's trip CSV into a filtered dataset, computes the time,
//! station, duration and user statistics, and pages through raw rows.

pub mod aggregator;
pub mod analysis;
pub mod pager;
pub mod reader;
pub mod statistics;

pub use bikeshare_core as core;
