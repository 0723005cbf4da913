//! Descriptive statistics over a (filtered) [`Dataset`].
//!
//! Each function is independent and reads the dataset without modifying it.
//! All of them refuse an empty dataset with [`BikeshareError::EmptyDataset`].

use chrono::Weekday;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::round_to;
use bikeshare_core::models::Dataset;
use bikeshare_core::time_utils::WEEKDAYS;

use crate::aggregator::FrequencyTable;

// ── Result types ──────────────────────────────────────────────────────────────

/// A most-frequent value together with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Ranked<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// 1-based month number.
    pub common_month: Ranked<u32>,
    pub common_day: Ranked<Weekday>,
    /// Hour of day, `0..=23`.
    pub common_hour: Ranked<u32>,
}

/// A start/end station pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Route {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip. Blank station names are not counted, so
/// each figure is `None` when no trip names the station(s) it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub top_start_station: Option<Ranked<String>>,
    pub top_end_station: Option<Ranked<String>>,
    /// Most frequent (start, end) pair, counted as one category.
    pub top_route: Option<Ranked<Route>>,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Sum of all durations in hours, rounded to 2 places.
    pub total_hours: f64,
    /// Mean duration in minutes, rounded to 2 places.
    pub average_minutes: f64,
    pub trip_count: usize,
}

/// User demographics. `None` means "not available" for this city or filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Distinct user types, most frequent first. Blank user types are skipped.
    pub user_type_counts: Vec<(String, usize)>,
    /// `None` when the source has no Gender column.
    pub gender_counts: Option<Vec<(String, usize)>>,
    pub birth_year_min: Option<i32>,
    pub birth_year_max: Option<i32>,
    pub birth_year_mode: Option<Ranked<i32>>,
    /// Trips summarised, for computing shares.
    pub trip_count: usize,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Most common month, day of week and start hour.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    ensure_not_empty(dataset)?;

    let months: FrequencyTable<u32> = dataset.records.iter().map(|t| t.month()).collect();
    // Weekday has no ordering of its own; count Monday-based indices.
    let days: FrequencyTable<u32> = dataset
        .records
        .iter()
        .map(|t| t.day_of_week().num_days_from_monday())
        .collect();
    let hours: FrequencyTable<u32> = dataset.records.iter().map(|t| t.hour()).collect();

    let (day_idx, day_count) = top(&days)?;

    Ok(TimeStats {
        common_month: ranked(&months)?,
        common_day: Ranked::new(WEEKDAYS[day_idx as usize], day_count),
        common_hour: ranked(&hours)?,
    })
}

/// Most popular start station, end station and start/end combination.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    ensure_not_empty(dataset)?;

    let starts: FrequencyTable<&str> = dataset
        .records
        .iter()
        .filter_map(|t| named(&t.start_station))
        .collect();
    let ends: FrequencyTable<&str> = dataset
        .records
        .iter()
        .filter_map(|t| named(&t.end_station))
        .collect();
    let routes: FrequencyTable<(&str, &str)> = dataset
        .records
        .iter()
        .filter_map(|t| Some((named(&t.start_station)?, named(&t.end_station)?)))
        .collect();

    let station = |(name, count): (&&str, usize)| Ranked::new(name.to_string(), count);

    Ok(StationStats {
        top_start_station: starts.mode().map(station),
        top_end_station: ends.mode().map(station),
        top_route: routes.mode().map(|((start, end), count)| {
            Ranked::new(
                Route {
                    start: start.to_string(),
                    end: end.to_string(),
                },
                count,
            )
        }),
    })
}

/// Total travel time in hours and mean trip length in minutes.
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    ensure_not_empty(dataset)?;

    let total_seconds: f64 = dataset.records.iter().map(|t| t.trip_duration).sum();
    let trip_count = dataset.len();

    Ok(DurationStats {
        total_hours: round_to(total_seconds / 3600.0, 2),
        average_minutes: round_to(total_seconds / trip_count as f64 / 60.0, 2),
        trip_count,
    })
}

/// User type and gender breakdowns plus birth-year extremes and mode.
///
/// Missing Gender or Birth Year columns leave the matching fields `None`;
/// they never cause an error.
pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    ensure_not_empty(dataset)?;

    let user_types: FrequencyTable<String> = dataset
        .records
        .iter()
        .filter_map(|t| t.user_type.clone())
        .collect();

    let gender_counts = dataset.columns.gender.then(|| {
        dataset
            .records
            .iter()
            .filter_map(|t| t.gender.clone())
            .collect::<FrequencyTable<String>>()
            .value_counts()
    });

    let birth_years: FrequencyTable<i32> = if dataset.columns.birth_year {
        dataset.records.iter().filter_map(|t| t.birth_year).collect()
    } else {
        FrequencyTable::new()
    };

    Ok(UserStats {
        user_type_counts: user_types.value_counts(),
        gender_counts,
        birth_year_min: birth_years.min_key().copied(),
        birth_year_max: birth_years.max_key().copied(),
        birth_year_mode: birth_years
            .mode()
            .map(|(year, count)| Ranked::new(*year, count)),
        trip_count: dataset.len(),
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn ensure_not_empty(dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    Ok(())
}

/// `None` for a blank station name.
fn named(station: &str) -> Option<&str> {
    let trimmed = station.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn top<K: Ord + Copy>(table: &FrequencyTable<K>) -> Result<(K, usize)> {
    table
        .mode()
        .map(|(k, c)| (*k, c))
        .ok_or(BikeshareError::EmptyDataset)
}

fn ranked<K: Ord + Copy>(table: &FrequencyTable<K>) -> Result<Ranked<K>> {
    top(table).map(|(value, count)| Ranked::new(value, count))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
