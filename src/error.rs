use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a "DD Mon YYYY" date token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input did not split into exactly day, month and year.
    #[error("expected 'DD Mon YYYY', got '{input}'")]
    Shape { input: String },

    /// The day-of-month token is not a number.
    #[error("invalid day '{token}'")]
    Day { token: String },

    /// The month token is not in the abbreviation table.
    #[error("unknown month '{token}'")]
    UnknownMonth { token: String },

    /// The year token is not a 4-digit number.
    #[error("invalid year '{token}'")]
    Year { token: String },

    /// All tokens were readable but do not name a real calendar day.
    #[error("{day} {month} {year} is not a calendar date")]
    OutOfRange { day: u32, month: u32, year: i32 },
}

/// Errors raised while loading milestone data from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header row lacks one of the required columns.
    #[error("CSV is missing required columns. Found headers: {found:?}. Need columns for: milestone, start date, end date.")]
    MissingColumns { found: Vec<String> },

    /// Nothing usable was found in the source.
    #[error("No valid milestones found ({skipped} rows skipped)")]
    Empty { skipped: usize },
}

/// Result type alias for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised by the settings store.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}
