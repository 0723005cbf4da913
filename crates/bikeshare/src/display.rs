//! Console rendering of statistics and raw rows.
//!
//! Everything writes to a caller-supplied [`Write`] so the prompt driver and
//! its tests share the same code path.

use std::io::{self, Write};

use bikeshare_core::formatting::{format_count, format_number, percentage};
use bikeshare_core::models::{ColumnSet, TripRecord};
use bikeshare_core::time_utils::{hour_label, month_name, weekday_name};
use bikeshare_data::analysis::AnalysisReport;
use bikeshare_data::statistics::{DurationStats, Ranked, StationStats, TimeStats, UserStats};
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 40;
const NOT_AVAILABLE: &str = "not available";

// ── Report sections ───────────────────────────────────────────────────────────

/// Write all four statistics sections in order.
pub fn write_report(out: &mut impl Write, report: &AnalysisReport) -> io::Result<()> {
    write_time_stats(out, &report.time, report.timing.time_seconds)?;
    write_station_stats(out, &report.stations, report.timing.station_seconds)?;
    write_duration_stats(out, &report.durations, report.timing.duration_seconds)?;
    write_user_stats(out, &report.users, report.timing.user_seconds)
}

pub fn write_time_stats(out: &mut impl Write, stats: &TimeStats, seconds: f64) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    let month = month_name(stats.common_month.value)
        .unwrap_or_else(|| stats.common_month.value.to_string());
    writeln!(
        out,
        "Most common month: {} ({} trips)",
        month,
        format_count(stats.common_month.count)
    )?;
    writeln!(
        out,
        "Most common day:   {} ({} trips)",
        weekday_name(stats.common_day.value),
        format_count(stats.common_day.count)
    )?;
    writeln!(
        out,
        "Most common hour:  {} ({}, {} trips)",
        stats.common_hour.value,
        hour_label(stats.common_hour.value),
        format_count(stats.common_hour.count)
    )?;
    write_footer(out, seconds)
}

pub fn write_station_stats(
    out: &mut impl Write,
    stats: &StationStats,
    seconds: f64,
) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    writeln!(
        out,
        "Most common start station: {}",
        ranked_station(stats.top_start_station.as_ref())
    )?;
    writeln!(
        out,
        "Most common end station:   {}",
        ranked_station(stats.top_end_station.as_ref())
    )?;
    let route = match &stats.top_route {
        Some(route) => format!(
            "{} -> {} ({} trips)",
            route.value.start,
            route.value.end,
            format_count(route.count)
        ),
        None => NOT_AVAILABLE.to_string(),
    };
    writeln!(out, "Most frequent trip:        {}", route)?;
    write_footer(out, seconds)
}

fn ranked_station(station: Option<&Ranked<String>>) -> String {
    match station {
        Some(s) => format!("{} ({} trips)", s.value, format_count(s.count)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn write_duration_stats(
    out: &mut impl Write,
    stats: &DurationStats,
    seconds: f64,
) -> io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    writeln!(
        out,
        "Total travel time:     {} hours over {} trips",
        format_number(stats.total_hours, 2),
        format_count(stats.trip_count)
    )?;
    writeln!(
        out,
        "Average trip duration: {} minutes",
        format_number(stats.average_minutes, 2)
    )?;
    write_footer(out, seconds)
}

pub fn write_user_stats(out: &mut impl Write, stats: &UserStats, seconds: f64) -> io::Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;

    writeln!(out, "Counts of user types:")?;
    write_counts(out, &stats.user_type_counts, stats.trip_count)?;

    match &stats.gender_counts {
        Some(counts) if !counts.is_empty() => {
            writeln!(out, "Counts of gender:")?;
            write_counts(out, counts, stats.trip_count)?;
        }
        _ => writeln!(out, "Counts of gender: {}", NOT_AVAILABLE)?,
    }

    writeln!(
        out,
        "Earliest year of birth:    {}",
        optional(stats.birth_year_min)
    )?;
    writeln!(
        out,
        "Most recent year of birth: {}",
        optional(stats.birth_year_max)
    )?;
    match &stats.birth_year_mode {
        Some(mode) => writeln!(
            out,
            "Most common year of birth: {} ({} trips)",
            mode.value,
            format_count(mode.count)
        )?,
        None => writeln!(out, "Most common year of birth: {}", NOT_AVAILABLE)?,
    }
    write_footer(out, seconds)
}

// ── Raw rows ──────────────────────────────────────────────────────────────────

/// Write `rows` as aligned `column: value` blocks. `first_index` is the
/// 0-based position of `rows[0]` in the dataset.
pub fn write_rows(
    out: &mut impl Write,
    rows: &[TripRecord],
    columns: ColumnSet,
    first_index: usize,
) -> io::Result<()> {
    for (offset, trip) in rows.iter().enumerate() {
        let fields = row_fields(trip, columns);
        let width = fields.iter().map(|(k, _)| k.width()).max().unwrap_or(0);

        writeln!(out, "\n[{}]", first_index + offset + 1)?;
        for (key, value) in fields {
            writeln!(out, "  {}: {}", pad_right(key, width), value)?;
        }
    }
    Ok(())
}

fn row_fields(trip: &TripRecord, columns: ColumnSet) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        (
            "Start Time",
            trip.start_time().format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        ("End Time", trip.end_time.clone()),
        ("Trip Duration", format!("{} s", trip.trip_duration)),
        ("Start Station", trip.start_station.clone()),
        ("End Station", trip.end_station.clone()),
        ("User Type", trip.user_type.clone().unwrap_or_default()),
    ];
    if columns.gender {
        fields.push(("Gender", trip.gender.clone().unwrap_or_default()));
    }
    if columns.birth_year {
        fields.push((
            "Birth Year",
            trip.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        ));
    }
    fields.push(("month", trip.month().to_string()));
    fields.push(("day_of_week", weekday_name(trip.day_of_week()).to_string()));
    fields.push(("hour", trip.hour().to_string()));
    fields
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Name/count/share lines, names padded to the widest display width.
fn write_counts(out: &mut impl Write, counts: &[(String, usize)], total: usize) -> io::Result<()> {
    let width = counts.iter().map(|(name, _)| name.width()).max().unwrap_or(0);
    for (name, count) in counts {
        writeln!(
            out,
            "  {}  {:>9}  ({:.1}%)",
            pad_right(name, width),
            format_count(*count),
            percentage(*count, total, 1)
        )?;
    }
    Ok(())
}

fn write_footer(out: &mut impl Write, seconds: f64) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", format_number(seconds, 4))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn optional(value: Option<i32>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Pad `s` with spaces to `width` terminal columns.
fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
