//! Full statistics pass over a filtered dataset.
//!
//! Runs the four statistics in display order and records how long each took,
//! so the console report can print per-section timings.

use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::Dataset;
use tracing::debug;

use crate::statistics::{
    duration_stats, station_stats, time_stats, user_stats, DurationStats, StationStats, TimeStats,
    UserStats,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Wall-clock seconds spent on each section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionTiming {
    pub time_seconds: f64,
    pub station_seconds: f64,
    pub duration_seconds: f64,
    pub user_seconds: f64,
}

impl SectionTiming {
    pub fn total_seconds(&self) -> f64 {
        self.time_seconds + self.station_seconds + self.duration_seconds + self.user_seconds
    }
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
    pub timing: SectionTiming,
    /// Number of trips the statistics cover.
    pub trips_analyzed: usize,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Compute every statistic for `dataset`.
///
/// Fails with [`BikeshareError::EmptyDataset`] when there is nothing to
/// summarise.
pub fn analyze(dataset: &Dataset) -> Result<AnalysisReport> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }

    let (time, time_seconds) = timed(|| time_stats(dataset))?;
    let (stations, station_seconds) = timed(|| station_stats(dataset))?;
    let (durations, duration_seconds) = timed(|| duration_stats(dataset))?;
    let (users, user_seconds) = timed(|| user_stats(dataset))?;

    let timing = SectionTiming {
        time_seconds,
        station_seconds,
        duration_seconds,
        user_seconds,
    };
    debug!(
        "Analysed {} trips in {:.4}s",
        dataset.len(),
        timing.total_seconds()
    );

    Ok(AnalysisReport {
        time,
        stations,
        durations,
        users,
        timing,
        trips_analyzed: dataset.len(),
    })
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn timed<T>(f: impl FnOnce() -> Result<T>) -> Result<(T, f64)> {
    let started = Instant::now();
    let value = f()?;
    Ok((value, started.elapsed().as_secs_f64()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
