use chrono::{NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

/// Month names in calendar order, lowercase. Only January through June may
/// be used as a filter; the rest exist for display.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Weekdays in the order used for tie-breaks and listings (Monday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Naive formats tried in order by [`parse_start_time`].
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a trip timestamp such as `"2017-01-01 09:07:57"`.
///
/// Timestamps are wall-clock times in the city's local zone and are kept
/// naive. A bare date is read as midnight. Returns `None` for empty or
/// unrecognised input.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    trace!("could not parse timestamp {:?}", s);
    None
}

// ── Calendar names ────────────────────────────────────────────────────────────

/// Capitalised English name of a weekday, e.g. `"Tuesday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Look up a weekday by its English name, ignoring case and surrounding
/// whitespace. Only full names are accepted.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let canonical = title_case(name.trim());
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d) == canonical)
}

/// Capitalised English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<String> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).map(|name| title_case(name))
}

/// Upper-case the first character and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Render an hour of the day on the 12-hour clock, e.g. `17` → `"5 PM"`.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
