//! Parsing of reference instants.
//!
//! The core works on epoch seconds throughout; this module turns user input
//! into that representation. Accepted formats:
//! - `epoch_s`: Unix epoch seconds (default)
//! - `epoch_ms`: Unix epoch milliseconds, truncated to the second
//! - `rfc3339`: RFC3339 strings (e.g. `2026-03-02T10:00:00Z`)
//! - `auto`: guess from the shape of the input

use std::str::FromStr;

use chrono::DateTime;

use crate::error::{CalendarError, Result};

/// Supported timestamp formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    #[default]
    EpochS,
    EpochMs,
    Rfc3339,
    Auto,
}

impl std::fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampFormat::EpochS => write!(f, "epoch_s"),
            TimestampFormat::EpochMs => write!(f, "epoch_ms"),
            TimestampFormat::Rfc3339 => write!(f, "rfc3339"),
            TimestampFormat::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "epoch_s" => Ok(TimestampFormat::EpochS),
            "epoch_ms" => Ok(TimestampFormat::EpochMs),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "auto" => Ok(TimestampFormat::Auto),
            _ => Err(CalendarError::ParseError(format!(
                "Unknown format: '{}'. Expected 'epoch_s', 'epoch_ms', 'rfc3339' or 'auto'",
                s
            ))),
        }
    }
}

/// Parse a timestamp string into epoch seconds.
///
/// # Examples
///
/// ```
/// use weekcal_core::parse::{parse_instant, TimestampFormat};
///
/// let ts = parse_instant("2026-03-02T10:00:00Z", TimestampFormat::Rfc3339).unwrap();
/// assert_eq!(ts, 1_772_445_600);
/// assert_eq!(parse_instant("1772445600000", TimestampFormat::EpochMs).unwrap(), ts);
/// ```
pub fn parse_instant(input: &str, format: TimestampFormat) -> Result<i64> {
    let trimmed = input.trim();

    match format {
        TimestampFormat::EpochS => parse_integer(trimmed, "epoch seconds"),
        TimestampFormat::EpochMs => {
            parse_integer(trimmed, "epoch milliseconds").map(|ms| ms.div_euclid(1000))
        }
        TimestampFormat::Rfc3339 => parse_rfc3339(trimmed),
        TimestampFormat::Auto => parse_auto(trimmed),
    }
}

fn parse_integer(input: &str, what: &str) -> Result<i64> {
    input.parse().map_err(|_| {
        CalendarError::ParseError(format!(
            "Invalid {}: '{}'. Expected integer value.",
            what, input
        ))
    })
}

fn parse_rfc3339(input: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.timestamp())
        .map_err(|e| {
            CalendarError::ParseError(format!(
                "Invalid RFC3339 timestamp: '{}'. Error: {}",
                input, e
            ))
        })
}

/// RFC3339 if it has a date separator, otherwise a number; numbers above
/// 10^11 are taken as milliseconds.
fn parse_auto(input: &str) -> Result<i64> {
    if input.contains('T') || input.contains('Z') || input.contains(':') {
        return parse_rfc3339(input);
    }

    match input.parse::<i64>() {
        Ok(num) if num.abs() > 100_000_000_000 => Ok(num.div_euclid(1000)),
        Ok(num) => Ok(num),
        Err(_) => Err(CalendarError::ParseError(format!(
            "Could not auto-detect format for: '{}'",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_epoch_seconds() {
        assert_eq!(
            parse_instant(" 1772445600 ", TimestampFormat::EpochS).unwrap(),
            1_772_445_600
        );
    }

    #[test]
    fn parse_epoch_milliseconds_truncates() {
        assert_eq!(
            parse_instant("1772445600999", TimestampFormat::EpochMs).unwrap(),
            1_772_445_600
        );
    }

    #[test]
    fn parse_rfc3339_with_offset() {
        // 2026-03-02T11:00:00+01:00 = 2026-03-02T10:00:00Z
        assert_eq!(
            parse_instant("2026-03-02T11:00:00+01:00", TimestampFormat::Rfc3339).unwrap(),
            1_772_445_600
        );
    }

    #[test]
    fn parse_invalid_inputs() {
        assert!(parse_instant("soon", TimestampFormat::EpochS).is_err());
        assert!(parse_instant("not-a-date", TimestampFormat::Rfc3339).is_err());
        assert!(parse_instant("tomorrow", TimestampFormat::Auto).is_err());
    }

    #[test]
    fn auto_detection() {
        assert_eq!(
            parse_instant("2026-03-02T10:00:00Z", TimestampFormat::Auto).unwrap(),
            1_772_445_600
        );
        assert_eq!(
            parse_instant("1772445600000", TimestampFormat::Auto).unwrap(),
            1_772_445_600
        );
        assert_eq!(
            parse_instant("1772445600", TimestampFormat::Auto).unwrap(),
            1_772_445_600
        );
    }

    #[test]
    fn format_from_str_and_display() {
        assert_eq!(
            TimestampFormat::from_str("RFC3339").unwrap(),
            TimestampFormat::Rfc3339
        );
        assert_eq!(format!("{}", TimestampFormat::EpochMs), "epoch_ms");
        assert!(TimestampFormat::from_str("iso").is_err());
    }
}
