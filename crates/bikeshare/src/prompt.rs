//! Interactive driver: asks for filters, prints the statistics, pages raw
//! rows and offers to start over.
//!
//! The driver owns the loop; the data crate is called as a plain library.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use bikeshare_core::error::BikeshareError;
use bikeshare_core::models::{City, Dataset, DayFilter, MonthFilter, TripFilter};
use bikeshare_core::settings::DataSources;
use bikeshare_data::analysis::analyze;
use bikeshare_data::pager::{next_page, PAGE_SIZE};
use bikeshare_data::reader::load;
use tracing::{debug, error};

use crate::display;

const CITY_QUESTION: &str = "Which city would you like to explore: Chicago, New York City or Washington?";
const MONTH_QUESTION: &str =
    "Which month: January, February, March, April, May, June, or 'all' for no month filter?";
const DAY_QUESTION: &str = "Which day of the week (e.g. Monday), or 'all' for no day filter?";

/// Filters fixed on the command line. Only the first session uses them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preselected {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

/// Line-oriented console session over any input and output.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    // ── Session loop ──────────────────────────────────────────────────────────

    /// Run sessions until the user declines to restart or input ends.
    pub fn run(&mut self, sources: &DataSources, preselected: Preselected) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let mut preselected = Some(preselected);
        loop {
            let defaults = preselected.take().unwrap_or_default();
            let Some((city, filter)) = self.ask_filters(defaults)? else {
                break;
            };

            match load(sources, city, &filter) {
                Ok(dataset) => {
                    self.report(&dataset)?;
                    if !dataset.is_empty() && !self.page_rows(&dataset)? {
                        break;
                    }
                }
                Err(err) => {
                    error!("Loading {} failed: {}", city, err);
                    writeln!(self.output, "\nCould not load data for {}: {}", city, err)?;
                }
            }

            match self.ask_yes_no("\nWould you like to restart? Enter yes or no.")? {
                Some(true) => continue,
                _ => break,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Print every statistics section for `dataset`, or a notice when no
    /// trip survived the filters.
    pub fn report(&mut self, dataset: &Dataset) -> Result<()> {
        match analyze(dataset) {
            Ok(report) => display::write_report(&mut self.output, &report)?,
            Err(BikeshareError::EmptyDataset) => {
                writeln!(self.output, "\nNo trips match the selected filters.")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    // ── Filters ───────────────────────────────────────────────────────────────

    /// City and month/day filter, prompting for whatever `defaults` lacks.
    /// `None` when input ends before all three are known.
    pub fn ask_filters(&mut self, defaults: Preselected) -> Result<Option<(City, TripFilter)>> {
        let city = match defaults.city {
            Some(c) => c,
            None => match self.ask_until_valid::<City>(CITY_QUESTION)? {
                Some(c) => c,
                None => return Ok(None),
            },
        };
        let month = match defaults.month {
            Some(m) => m,
            None => match self.ask_until_valid::<MonthFilter>(MONTH_QUESTION)? {
                Some(m) => m,
                None => return Ok(None),
            },
        };
        let day = match defaults.day {
            Some(d) => d,
            None => match self.ask_until_valid::<DayFilter>(DAY_QUESTION)? {
                Some(d) => d,
                None => return Ok(None),
            },
        };

        let filter = TripFilter::new(month, day);
        writeln!(self.output, "\nExploring {} ({})", city, filter)?;
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(Some((city, filter)))
    }

    // ── Raw data pager ────────────────────────────────────────────────────────

    /// Show raw rows five at a time while the user keeps answering yes.
    /// Returns `false` when input ended.
    pub fn page_rows(&mut self, dataset: &Dataset) -> Result<bool> {
        let question = format!(
            "\nWould you like to see {} rows of raw data? Enter yes or no.",
            PAGE_SIZE
        );
        let mut cursor = 0;
        loop {
            match self.ask_yes_no(&question)? {
                Some(true) => {}
                Some(false) => return Ok(true),
                None => return Ok(false),
            }

            let (rows, next) = next_page(dataset, cursor);
            if rows.is_empty() {
                writeln!(self.output, "No more rows to show.")?;
                return Ok(true);
            }
            display::write_rows(&mut self.output, rows, dataset.columns, cursor)?;
            debug!("showed rows {}..{}", cursor, next);
            cursor = next;
        }
    }

    // ── Primitives ────────────────────────────────────────────────────────────

    /// Ask `question` until the answer parses as `T`. `None` on end of input.
    fn ask_until_valid<T>(&mut self, question: &str) -> io::Result<Option<T>>
    where
        T: FromStr<Err = BikeshareError>,
    {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    debug!("rejected answer: {}", err);
                    writeln!(self.output, "Sorry, {:?} is not a valid choice.", answer.trim())?;
                }
            }
        }
    }

    /// Ask a yes/no question until answered. `None` on end of input.
    fn ask_yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.trim().to_lowercase().as_str() {
                "yes" | "y" => return Ok(Some(true)),
                "no" | "n" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please enter yes or no.")?,
            }
        }
    }

    /// Print `question` and read one line. `None` on end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
