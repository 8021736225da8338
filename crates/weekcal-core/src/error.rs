//! Error types for weekcal-core.
//!
//! Clamping out-of-canvas geometry is not an error and never surfaces here;
//! the layout engine recovers from it silently.

use thiserror::Error;

/// The main error type for weekcal operations.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Error parsing timestamp input.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unrecognised view kind requested.
    #[error("Invalid window request: unknown view '{0}'")]
    InvalidWindowRequest(String),

    /// Event without a usable start or end instant.
    #[error("Malformed event '{id}': {reason}")]
    MalformedEvent { id: String, reason: String },

    /// A date or timestamp outside what the calendar can represent.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// Invalid or unreadable configuration.
    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for weekcal operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
