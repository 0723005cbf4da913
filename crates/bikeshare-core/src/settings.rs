use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{City, DayFilter, MonthFilter, TripFilter};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data from the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data from the terminal",
    version
)]
pub struct Settings {
    /// City to analyse (prompted for when omitted)
    #[arg(long, ignore_case = true, value_parser = ["chicago", "new york city", "washington"])]
    pub city: Option<String>,

    /// Month filter, January to June (prompted for when omitted)
    #[arg(long, ignore_case = true, value_parser = ["january", "february", "march", "april", "may", "june", "all"])]
    pub month: Option<String>,

    /// Day-of-week filter (prompted for when omitted)
    #[arg(long, ignore_case = true, value_parser = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "all"])]
    pub day: Option<String>,

    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Print the statistics once for the given filters and exit without prompting
    #[arg(long, requires = "city")]
    pub batch: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but over an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// City given on the command line, if any.
    pub fn city(&self) -> Result<Option<City>> {
        self.city.as_deref().map(str::parse::<City>).transpose()
    }

    /// Month/day filter assembled from the command line; absent values mean
    /// "all".
    pub fn filter(&self) -> Result<TripFilter> {
        let month = match self.month.as_deref() {
            Some(m) => m.parse::<MonthFilter>()?,
            None => MonthFilter::All,
        };
        let day = match self.day.as_deref() {
            Some(d) => d.parse::<DayFilter>()?,
            None => DayFilter::All,
        };
        Ok(TripFilter::new(month, day))
    }

    /// City-to-file mapping rooted at `--data-dir`.
    pub fn data_sources(&self) -> DataSources {
        DataSources::from_dir(&self.data_dir)
    }
}

// ── DataSources ────────────────────────────────────────────────────────────────

/// Immutable mapping from each [`City`] to the CSV file holding its trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    files: BTreeMap<City, PathBuf>,
}

impl DataSources {
    /// Standard file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let files = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.file_name())))
            .collect();
        Self { files }
    }

    /// Path of the CSV file for `city`.
    pub fn path_for(&self, city: City) -> &Path {
        // `from_dir` fills in every city.
        self.files[&city].as_path()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn parse(args: &[&str]) -> Settings {
        let mut full = vec!["bikeshare"];
        full.extend_from_slice(args);
        Settings::load_from_args(full).expect("valid args")
    }

    // ── defaults ─────────────────────────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let s = parse(&[]);
        assert!(s.city.is_none());
        assert!(s.month.is_none());
        assert!(s.day.is_none());
        assert_eq!(s.data_dir, PathBuf::from("."));
        assert!(!s.batch);
        assert_eq!(s.log_level, "WARNING");
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let s = parse(&["--log-level", "ERROR", "--debug"]);
        assert_eq!(s.log_level, "DEBUG");
    }

    // ── filters ──────────────────────────────────────────────────────────────

    #[test]
    fn test_city_and_filter_from_args() {
        let s = parse(&["--city", "New York City", "--month", "March", "--day", "sunday"]);
        assert_eq!(s.city().unwrap(), Some(City::NewYorkCity));
        let f = s.filter().unwrap();
        assert_eq!(f.month, MonthFilter::Month(3));
        assert_eq!(f.day, DayFilter::Day(Weekday::Sun));
    }

    #[test]
    fn test_missing_filters_mean_all() {
        let s = parse(&["--city", "chicago"]);
        assert_eq!(s.filter().unwrap(), TripFilter::default());
    }

    #[test]
    fn test_rejects_unknown_city() {
        assert!(Settings::load_from_args(["bikeshare", "--city", "boston"]).is_err());
    }

    #[test]
    fn test_rejects_month_after_june() {
        assert!(Settings::load_from_args(["bikeshare", "--month", "july"]).is_err());
    }

    #[test]
    fn test_batch_requires_city() {
        assert!(Settings::load_from_args(["bikeshare", "--batch"]).is_err());
        assert!(parse(&["--batch", "--city", "washington"]).batch);
    }

    // ── DataSources ──────────────────────────────────────────────────────────

    #[test]
    fn test_data_sources_from_dir() {
        let s = parse(&["--data-dir", "/srv/bikeshare"]);
        let sources = s.data_sources();
        assert_eq!(
            sources.path_for(City::NewYorkCity),
            Path::new("/srv/bikeshare/new_york_city.csv")
        );
        assert_eq!(
            sources.path_for(City::Washington),
            Path::new("/srv/bikeshare/washington.csv")
        );
    }
}
