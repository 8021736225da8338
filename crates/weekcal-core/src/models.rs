//! Core data types for weekcal.
//!
//! This module defines the primary types shared by every component:
//! - [`ViewKind`] - Which calendar view a window is resolved for
//! - [`DateParts`] - A timestamp broken down by a calendar type
//! - [`OrdinalDay`] - A `(year, day_of_year)` pair used for day comparisons
//! - [`CalendarEvent`] - An externally supplied event
//! - [`TimeWindow`] - An inclusive range of instants covered by a view

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Multiplier folding a year into an ordinal key. Must exceed the largest
/// possible day of year so that keys never collide across years.
pub const ORDINAL_YEAR_SPAN: i64 = 366;

/// Calendar view kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// A single calendar day.
    Day,
    /// Seven days starting on weekday 1 of the reference week.
    #[default]
    Week,
    /// The whole calendar month of the reference instant.
    Month,
    /// A lookahead window starting at the reference instant.
    Upcoming,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Day => write!(f, "day"),
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
            ViewKind::Upcoming => write!(f, "upcoming"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "day" => Ok(ViewKind::Day),
            "week" => Ok(ViewKind::Week),
            "month" | "monthblock" | "mini" | "minithree" => Ok(ViewKind::Month),
            "upcoming" | "upcoming_mini" => Ok(ViewKind::Upcoming),
            _ => Err(CalendarError::InvalidWindowRequest(s.to_string())),
        }
    }
}

/// A timestamp broken down into calendar fields.
///
/// `weekday` is 1-based with 1 = Monday; `day_of_year` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateParts {
    /// The instant these parts were derived from (epoch seconds).
    pub timestamp: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: u32,
    pub day_of_year: u32,
    pub hour: u32,
    pub minute: u32,
}

impl DateParts {
    /// The ordinal day these parts fall on.
    pub fn ordinal(&self) -> OrdinalDay {
        OrdinalDay {
            year: self.year,
            day_of_year: self.day_of_year,
        }
    }
}

/// A calendar day identified by `(year, day_of_year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrdinalDay {
    pub year: i32,
    pub day_of_year: u32,
}

impl OrdinalDay {
    /// Total-order key: `year * 366 + day_of_year`.
    pub fn key(&self) -> i64 {
        i64::from(self.year) * ORDINAL_YEAR_SPAN + i64::from(self.day_of_year)
    }
}

impl PartialOrd for OrdinalDay {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdinalDay {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// A calendar event as supplied by the event source.
///
/// Start and end are optional on the wire; an event missing either is
/// malformed and gets skipped by the bucketing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Opaque identifier.
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Start instant (epoch seconds).
    #[serde(default)]
    pub time_start: Option<i64>,
    /// End instant (epoch seconds).
    #[serde(default)]
    pub time_end: Option<i64>,
}

impl CalendarEvent {
    /// Create a well-formed event.
    pub fn new(id: impl Into<String>, name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time_start: Some(start),
            time_end: Some(end),
        }
    }

    /// Start and end instants, or [`CalendarError::MalformedEvent`] if either
    /// is missing. `end >= start` is assumed, not checked.
    pub fn times(&self) -> Result<(i64, i64)> {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(CalendarError::MalformedEvent {
                id: self.id.clone(),
                reason: "missing start time".to_string(),
            }),
            (_, None) => Err(CalendarError::MalformedEvent {
                id: self.id.clone(),
                reason: "missing end time".to_string(),
            }),
        }
    }
}

/// An inclusive range of instants (epoch seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Whether `[start, end]` shares at least one instant with this window.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start <= self.end && end >= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_kind_default_is_week() {
        assert_eq!(ViewKind::default(), ViewKind::Week);
    }

    #[test]
    fn view_kind_display() {
        assert_eq!(format!("{}", ViewKind::Day), "day");
        assert_eq!(format!("{}", ViewKind::Week), "week");
        assert_eq!(format!("{}", ViewKind::Month), "month");
        assert_eq!(format!("{}", ViewKind::Upcoming), "upcoming");
    }

    #[test]
    fn view_kind_aliases() {
        assert_eq!("WEEK".parse::<ViewKind>().unwrap(), ViewKind::Week);
        assert_eq!("monthblock".parse::<ViewKind>().unwrap(), ViewKind::Month);
        assert_eq!("minithree".parse::<ViewKind>().unwrap(), ViewKind::Month);
        assert_eq!(
            "upcoming_mini".parse::<ViewKind>().unwrap(),
            ViewKind::Upcoming
        );
    }

    #[test]
    fn unknown_view_is_invalid_window_request() {
        match "fortnight".parse::<ViewKind>() {
            Err(CalendarError::InvalidWindowRequest(view)) => assert_eq!(view, "fortnight"),
            other => panic!("Expected InvalidWindowRequest, got {other:?}"),
        }
    }

    #[test]
    fn ordinal_key_monotonic_across_leap_year_boundary() {
        let last_of_2024 = OrdinalDay {
            year: 2024,
            day_of_year: 366,
        };
        let first_of_2025 = OrdinalDay {
            year: 2025,
            day_of_year: 1,
        };
        assert!(last_of_2024.key() < first_of_2025.key());
        assert_eq!(first_of_2025.key() - last_of_2024.key(), 1);
        assert!(last_of_2024 < first_of_2025);
    }

    #[test]
    fn event_times_reports_missing_fields() {
        let mut event = CalendarEvent::new("7", "Quiz", 100, 200);
        assert_eq!(event.times().unwrap(), (100, 200));

        event.time_end = None;
        match event.times() {
            Err(CalendarError::MalformedEvent { id, reason }) => {
                assert_eq!(id, "7");
                assert!(reason.contains("end"));
            }
            other => panic!("Expected MalformedEvent, got {other:?}"),
        }
    }

    #[test]
    fn event_deserializes_without_times() {
        let event: CalendarEvent = serde_json::from_str(r#"{"id": "3"}"#).unwrap();
        assert_eq!(event.time_start, None);
        assert!(event.times().is_err());
    }

    #[test]
    fn window_overlap_is_inclusive() {
        let window = TimeWindow { start: 10, end: 20 };
        assert!(window.overlaps(20, 30));
        assert!(window.overlaps(0, 10));
        assert!(!window.overlaps(21, 30));
        assert!(!window.overlaps(0, 9));
    }

    #[test]
    fn view_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ViewKind::Upcoming).unwrap(),
            "\"upcoming\""
        );
    }
}
