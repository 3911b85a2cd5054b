use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while retrieving a single currency pair from the provider.
///
/// These are never fatal: the pair is dropped and the run continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed for {pair}: {source}")]
    Http {
        pair: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider returned status {status} for {pair}")]
    Status { pair: String, status: u16 },

    #[error("Provider rejected {pair}: {code} ({description})")]
    Provider {
        pair: String,
        code: String,
        description: String,
    },

    #[error("Invalid market data for {pair}: {reason}")]
    Decode { pair: String, reason: String },

    #[error("Cannot build request for {pair}: {reason}")]
    InvalidRequest { pair: String, reason: String },

    #[error("No closing prices for {pair} between {start} and {end}")]
    EmptySeries {
        pair: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl FetchError {
    pub fn pair(&self) -> &str {
        match self {
            FetchError::Http { pair, .. }
            | FetchError::Status { pair, .. }
            | FetchError::Provider { pair, .. }
            | FetchError::Decode { pair, .. }
            | FetchError::InvalidRequest { pair, .. }
            | FetchError::EmptySeries { pair, .. } => pair,
        }
    }
}

/// Errors raised while writing one export file. Never fatal.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode CSV for {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors related to the analysis configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid date for {key}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { key: String, value: String },

    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No currency pairs configured")]
    EmptyPairList,
}

/// Shape violations when assembling a date-indexed table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Column {column} has {actual} rows, index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column {column}")]
    DuplicateColumn { column: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_formatting() {
        let error = FetchError::Provider {
            pair: "XXXYYY=X".to_string(),
            code: "Not Found".to_string(),
            description: "No data found, symbol may be delisted".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("XXXYYY=X"));
        assert!(msg.contains("Not Found"));
        assert_eq!(error.pair(), "XXXYYY=X");
    }

    #[test]
    fn test_empty_series_formatting() {
        let error = FetchError::EmptySeries {
            pair: "EURUSD=X".to_string(),
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        };

        let msg = error.to_string();
        assert!(msg.contains("2023-01-01"));
        assert!(msg.contains("2023-01-31"));
    }

    #[test]
    fn test_frame_error_formatting() {
        let error = FrameError::LengthMismatch {
            column: "EURUSD=X".to_string(),
            expected: 10,
            actual: 9,
        };

        let msg = error.to_string();
        assert!(msg.contains("9 rows"));
        assert!(msg.contains("10"));
    }
}
