use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::error::BikeshareError;
use crate::time_utils::{month_name, weekday_from_name, weekday_name, MONTH_NAMES};

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed by users, e.g. `"new york city"`.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Default CSV file name for the city's trip data.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(display)
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    /// Case-insensitive; runs of whitespace count as a single space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let lower = normalised.to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| BikeshareError::invalid_filter("city", s))
    }
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Month selection: one of January through June, or all months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    /// 1-based month number. Parsing and [`MonthFilter::from_number`] only
    /// produce `1..=6`; a value built directly is not checked.
    Month(u32),
}

impl MonthFilter {
    /// Last month that may be selected (June).
    pub const LAST_FILTERABLE: u32 = 6;

    /// Build a filter from a 1-based month number.
    pub fn from_number(month: u32) -> Result<Self, BikeshareError> {
        if (1..=Self::LAST_FILTERABLE).contains(&month) {
            Ok(MonthFilter::Month(month))
        } else {
            Err(BikeshareError::invalid_filter("month", month.to_string()))
        }
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Month(m) => {
                f.write_str(&month_name(*m).unwrap_or_else(|| m.to_string()))
            }
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES[..Self::LAST_FILTERABLE as usize]
            .iter()
            .position(|name| *name == lower)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| BikeshareError::invalid_filter("month", s))
    }
}

// ── DayFilter ─────────────────────────────────────────────────────────────────

/// Day-of-week selection: a single weekday, or every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        weekday_from_name(s)
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::invalid_filter("day", s))
    }
}

// ── TripFilter ────────────────────────────────────────────────────────────────

/// Month and day restrictions applied together when loading a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// Whether this filter keeps `trip`.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip.month()) && self.day.matches(trip.day_of_week())
    }

    /// `true` when neither month nor day is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.month, self.day)
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single bicycle trip.
///
/// Month, day of week and hour are derived from the start time on every
/// access, so they always agree with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    /// End time exactly as published; never parsed.
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    /// Trip length in seconds.
    pub trip_duration: f64,
    /// Subscriber / Customer / Dependent. `None` when the source left it blank.
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Create a record with only the always-present fields set.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            start_time,
            end_time: String::new(),
            start_station: start_station.into(),
            end_station: end_station.into(),
            trip_duration,
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar month of the start time, January = 1.
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    pub fn day_of_week(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Hour of the start time, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSet {
    pub gender: bool,
    pub birth_year: bool,
}

/// An ordered collection of trips from one city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<TripRecord>,
    pub columns: ColumnSet,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, columns: ColumnSet) -> Self {
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return a new dataset holding only the trips `filter` keeps, in their
    /// original order. `self` is left untouched.
    pub fn filter(&self, filter: &TripFilter) -> Dataset {
        if filter.is_unrestricted() {
            return self.clone();
        }
        Dataset {
            records: self
                .records
                .iter()
                .filter(|trip| filter.matches(trip))
                .cloned()
                .collect(),
            columns: self.columns,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::parse_start_time;

    fn trip(ts: &str) -> TripRecord {
        TripRecord::new(parse_start_time(ts).unwrap(), "A", "B", 60.0)
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                trip("2017-01-02 08:00:00"), // Monday, January
                trip("2017-01-03 09:00:00"), // Tuesday, January
                trip("2017-02-06 10:00:00"), // Monday, February
                trip("2017-06-05 17:30:00"), // Monday, June
                trip("2017-06-10 17:45:00"), // Saturday, June
            ],
            ColumnSet::default(),
        )
    }

    // ── City ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_city_from_str() {
        assert_eq!("chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("New York City".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("  new   york city ".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("WASHINGTON".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_from_str_invalid() {
        let err = "boston".parse::<City>().unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidFilter { kind: "city", .. }));
    }

    #[test]
    fn test_city_file_names() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
    }

    // ── MonthFilter ──────────────────────────────────────────────────────────

    #[test]
    fn test_month_filter_from_str() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("January".parse::<MonthFilter>().unwrap(), MonthFilter::Month(1));
        assert_eq!("june".parse::<MonthFilter>().unwrap(), MonthFilter::Month(6));
    }

    #[test]
    fn test_month_filter_rejects_second_half_of_year() {
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("jan".parse::<MonthFilter>().is_err());
        assert!(MonthFilter::from_number(7).is_err());
        assert!(MonthFilter::from_number(0).is_err());
        assert_eq!(MonthFilter::from_number(3).unwrap(), MonthFilter::Month(3));
        // Built directly, a month past June matches none of January to June.
        assert!((1..=6).all(|m| !MonthFilter::Month(9).matches(m)));
    }

    #[test]
    fn test_month_filter_display() {
        assert_eq!(MonthFilter::Month(2).to_string(), "February");
        assert_eq!(MonthFilter::All.to_string(), "all months");
    }

    // ── DayFilter ────────────────────────────────────────────────────────────

    #[test]
    fn test_day_filter_from_str() {
        assert_eq!("ALL".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "friday".parse::<DayFilter>().unwrap(),
            DayFilter::Day(Weekday::Fri)
        );
        assert!("someday".parse::<DayFilter>().is_err());
    }

    // ── TripRecord ───────────────────────────────────────────────────────────

    #[test]
    fn test_derived_fields_follow_start_time() {
        let t = trip("2017-06-10 17:45:00");
        assert_eq!(t.month(), 6);
        assert_eq!(t.day_of_week(), Weekday::Sat);
        assert_eq!(t.hour(), 17);
    }

    // ── Dataset::filter ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_all_keeps_everything() {
        let ds = sample();
        assert_eq!(ds.filter(&TripFilter::default()), ds);
    }

    #[test]
    fn test_filter_by_month() {
        let ds = sample();
        let out = ds.filter(&TripFilter::new(MonthFilter::Month(6), DayFilter::All));
        assert_eq!(out.len(), 2);
        assert!(out.records.iter().all(|t| t.month() == 6));
    }

    #[test]
    fn test_filter_by_day_preserves_order() {
        let ds = sample();
        let out = ds.filter(&TripFilter::new(MonthFilter::All, DayFilter::Day(Weekday::Mon)));
        let hours: Vec<u32> = out.records.iter().map(|t| t.hour()).collect();
        assert_eq!(hours, vec![8, 10, 17]);
    }

    #[test]
    fn test_filter_by_month_and_day() {
        let ds = sample();
        let f = TripFilter::new(MonthFilter::Month(1), DayFilter::Day(Weekday::Tue));
        let out = ds.filter(&f);
        assert_eq!(out.len(), 1);
        assert_eq!(out.records[0].hour(), 9);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = sample();
        let f = TripFilter::new(MonthFilter::Month(6), DayFilter::Day(Weekday::Mon));
        let once = ds.filter(&f);
        assert_eq!(once.filter(&f), once);
    }

    #[test]
    fn test_filter_leaves_source_untouched() {
        let ds = sample();
        let _ = ds.filter(&TripFilter::new(MonthFilter::Month(2), DayFilter::All));
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn test_filter_keeps_column_set() {
        let mut ds = sample();
        ds.columns.gender = true;
        let out = ds.filter(&TripFilter::new(MonthFilter::Month(3), DayFilter::All));
        assert!(out.is_empty());
        assert!(out.columns.gender);
    }
}
