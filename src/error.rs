// src/error.rs

//! Unified error handling for the crawler application.
//!
//! Each pipeline stage decides whether a variant is fatal or skippable:
//! the season index stage propagates everything, month and box score pages
//! log [`AppError::Http`] / [`AppError::Fetch`] and move on, and
//! [`AppError::RowShape`] only ever produces a diagnostic.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Season label does not look like `YYYY-YY`
    #[error("Malformed season '{0}': expected format is 'YYYY-YY' (e.g. 2021-22)")]
    MalformedSeason(String),

    /// Date window with start after end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Caller supplied a date string that is not `YYYY-MM-DD`
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Network, timeout or body decoding failure
    #[error("Failed to fetch {url}: {cause}")]
    Fetch { url: String, cause: String },

    /// Parsed player row does not match the output schema
    #[error("Row for '{player}' has {found} fields, expected {expected}")]
    RowShape {
        player: String,
        found: usize,
        expected: usize,
    },

    /// AWS S3 error
    #[error("S3 error: {0}")]
    S3(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding/decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error carrying the URL and underlying cause.
    pub fn fetch(url: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            cause: cause.to_string(),
        }
    }

    /// Create an HTTP status error.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Whether this error came from fetching a page (status or transport).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Fetch { .. })
    }
}
