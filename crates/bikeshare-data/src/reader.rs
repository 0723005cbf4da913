//! CSV loading for bikeshare trip data.
//!
//! Reads one city's trip file into a [`Dataset`], validating every start
//! time up front, then narrows it with a [`TripFilter`].

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, ColumnSet, Dataset, TripFilter, TripRecord};
use bikeshare_core::settings::DataSources;
use bikeshare_core::time_utils::parse_start_time;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Header names that every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// One CSV row as published. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Some cities publish birth years as floats ("1989.0").
    #[serde(
        rename = "Birth Year",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `city`'s trips from `sources` and keep those matching `filter`.
///
/// Fails without returning any rows when the file is missing, lacks a
/// required column, or holds a start time that cannot be parsed.
pub fn load(sources: &DataSources, city: City, filter: &TripFilter) -> Result<Dataset> {
    let started = Instant::now();
    let path = sources.path_for(city);

    let all = read_trips(path)?;
    let filtered = all.filter(filter);

    info!(
        "Loaded {} trips for {} ({}), {} after filtering",
        all.len(),
        city,
        filter,
        filtered.len()
    );
    debug!(
        "load of {} took {:.3}s",
        path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(filtered)
}

/// Read every trip in the CSV file at `path`, unfiltered.
pub fn read_trips(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips_from(file, path)
}

/// Read trips from any CSV byte source. `origin` is only used in errors.
pub fn read_trips_from<R: Read>(source: R, origin: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has_column(c)) {
        return Err(BikeshareError::MissingColumn {
            path: origin.to_path_buf(),
            column: (*missing).to_string(),
        });
    }

    let columns = ColumnSet {
        gender: has_column(GENDER_COLUMN),
        birth_year: has_column(BIRTH_YEAR_COLUMN),
    };
    debug!(
        "{}: gender column {}, birth year column {}",
        origin.display(),
        if columns.gender { "present" } else { "absent" },
        if columns.birth_year { "present" } else { "absent" },
    );

    let mut records = Vec::new();
    let mut blank_user_types = 0usize;

    for (idx, row) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = row?;
        let trip = to_trip_record(raw, idx + 1)?;
        if trip.user_type.is_none() {
            blank_user_types += 1;
        }
        records.push(trip);
    }

    if blank_user_types > 0 {
        warn!(
            "{}: {} trips have no user type",
            origin.display(),
            blank_user_types
        );
    }
    debug!("{}: {} trips read", origin.display(), records.len());

    Ok(Dataset::new(records, columns))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Validate and convert one raw row. `row` is 1-based, counting data rows.
fn to_trip_record(raw: RawTrip, row: usize) -> Result<TripRecord> {
    let start_time =
        parse_start_time(&raw.start_time).ok_or_else(|| BikeshareError::UnparseableTimestamp {
            row,
            value: raw.start_time.clone(),
        })?;

    let trip_duration = raw
        .trip_duration
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| BikeshareError::InvalidField {
            row,
            column: "Trip Duration",
            value: raw.trip_duration.clone(),
        })?;

    let mut trip = TripRecord::new(start_time, raw.start_station, raw.end_station, trip_duration);
    trip.end_time = raw.end_time;
    trip.user_type = non_blank(raw.user_type);
    trip.gender = non_blank(raw.gender);
    trip.birth_year = raw
        .birth_year
        .filter(|y| y.is_finite())
        .map(|y| y.round() as i32);

    Ok(trip)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
