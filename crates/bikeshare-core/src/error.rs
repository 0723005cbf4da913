use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare crates.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city, month or day value outside its enumerated set.
    #[error("Invalid {kind}: {value:?}")]
    InvalidFilter { kind: &'static str, value: String },

    /// A `Start Time` value did not match any recognised timestamp format.
    #[error("Unparseable start time {value:?} on row {row}")]
    UnparseableTimestamp { row: usize, value: String },

    /// An aggregation was asked to summarise zero trips.
    #[error("Cannot compute statistics over an empty dataset")]
    EmptyDataset,

    /// The source file lacks one of the required columns.
    #[error("Missing required column {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A field carried a value of the wrong shape (e.g. a negative duration).
    #[error("Invalid {column} value {value:?} on row {row}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl BikeshareError {
    /// Shorthand for an [`BikeshareError::InvalidFilter`] error.
    pub fn invalid_filter(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilter {
            kind,
            value: value.into(),
        }
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_filter() {
        let err = BikeshareError::invalid_filter("city", "boston");
        assert_eq!(err.to_string(), "Invalid city: \"boston\"");
    }

    #[test]
    fn test_error_display_unparseable_timestamp() {
        let err = BikeshareError::UnparseableTimestamp {
            row: 3,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unparseable start time \"yesterday\" on row 3"
        );
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let msg = BikeshareError::EmptyDataset.to_string();
        assert!(msg.contains("empty dataset"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BikeshareError::MissingColumn {
            path: PathBuf::from("/data/chicago.csv"),
            column: "Start Time".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column \"Start Time\" in /data/chicago.csv"
        );
    }

    #[test]
    fn test_error_display_invalid_field() {
        let err = BikeshareError::InvalidField {
            row: 7,
            column: "Trip Duration",
            value: "-4".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Trip Duration value \"-4\" on row 7");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BikeshareError::FileRead {
            path: PathBuf::from("/some/washington.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/washington.csv"));
        assert!(msg.contains("no such file"));
    }
}
