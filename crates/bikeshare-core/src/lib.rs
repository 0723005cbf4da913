//! Core types for the bikeshare explorer.
//!
//! Holds the trip and filter models, the error taxonomy, timestamp and
//! calendar helpers, number formatting and command-line settings shared by
//! the data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
