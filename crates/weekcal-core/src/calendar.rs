//! Calendar type abstraction and its Gregorian implementation.
//!
//! Every date computation in the crate goes through [`CalendarType`], so the
//! window resolver, bucketer and layout engine never touch wall-clock
//! arithmetic directly. [`GregorianCalendar`] implements it on top of an
//! IANA timezone with DST-safe conversions.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{CalendarError, Result};
use crate::models::DateParts;

/// Short and full display names of a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayName {
    pub short_name: String,
    pub full_name: String,
}

/// A calendar system: converts between instants and calendar fields.
///
/// Weekdays are 1-based with 1 = Monday.
pub trait CalendarType {
    /// Break an instant (epoch seconds) into calendar fields.
    fn timestamp_to_date_parts(&self, ts: i64) -> Result<DateParts>;

    /// The instant of `year-month-day hour:00:00` local time.
    ///
    /// `day` may fall outside the month; it rolls over into the
    /// neighbouring months (day 0 is the last day of the previous month).
    fn date_parts_to_timestamp(&self, year: i32, month: u32, day: i64, hour: u32) -> Result<i64>;

    /// Number of weekdays in a week.
    fn weekdays_per_week(&self) -> u32;

    /// Number of days in the given month.
    fn days_in_month(&self, year: i32, month: u32) -> Result<u32>;

    /// The weekday a week starts on.
    fn first_weekday_of_week(&self) -> u32;

    /// Display names for a weekday.
    fn weekday_name(&self, weekday: u32) -> WeekdayName;
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The proleptic Gregorian calendar observed in one timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianCalendar {
    tz: Tz,
}

impl GregorianCalendar {
    /// Create a calendar observing `tz`.
    ///
    /// # Arguments
    ///
    /// * `tz` - The timezone local calendar days are computed in
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a calendar from an IANA timezone name.
    ///
    /// ```
    /// use weekcal_core::calendar::GregorianCalendar;
    ///
    /// let calendar = GregorianCalendar::from_tz_name("Europe/Paris").unwrap();
    /// assert_eq!(calendar.tz().to_string(), "Europe/Paris");
    /// ```
    pub fn from_tz_name(name: &str) -> Result<Self> {
        parse_tz(name).map(Self::new)
    }

    /// The timezone this calendar observes.
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// The instant as a local datetime in this calendar's timezone.
    ///
    /// # Arguments
    ///
    /// * `ts` - Epoch seconds
    ///
    /// # Returns
    ///
    /// The local datetime, or `DateOutOfRange` if chrono cannot represent
    /// the instant.
    pub fn local(&self, ts: i64) -> Result<DateTime<Tz>> {
        DateTime::<Utc>::from_timestamp(ts, 0)
            .map(|utc| utc.with_timezone(&self.tz))
            .ok_or_else(|| CalendarError::DateOutOfRange(format!("timestamp {}", ts)))
    }
}

impl CalendarType for GregorianCalendar {
    fn timestamp_to_date_parts(&self, ts: i64) -> Result<DateParts> {
        let local = self.local(ts)?;
        Ok(DateParts {
            timestamp: ts,
            year: local.year(),
            month: local.month(),
            day: local.day(),
            weekday: local.weekday().number_from_monday(),
            day_of_year: local.ordinal(),
            hour: local.hour(),
            minute: local.minute(),
        })
    }

    fn date_parts_to_timestamp(&self, year: i32, month: u32, day: i64, hour: u32) -> Result<i64> {
        let out_of_range =
            || CalendarError::DateOutOfRange(format!("{}-{:02} day {} hour {}", year, month, day, hour));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let offset = chrono::Duration::try_days(day - 1).ok_or_else(out_of_range)?;
        let local = first
            .checked_add_signed(offset)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .ok_or_else(out_of_range)?;

        local_to_utc(local, self.tz)
            .map(|utc| utc.timestamp())
            .ok_or_else(out_of_range)
    }

    fn weekdays_per_week(&self) -> u32 {
        7
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        let first = NaiveDate::from_ymd_opt(year, month, 1);
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };

        match (first, next) {
            (Some(first), Some(next)) => Ok((next - first).num_days() as u32),
            _ => Err(CalendarError::DateOutOfRange(format!(
                "month {}-{:02}",
                year, month
            ))),
        }
    }

    fn first_weekday_of_week(&self) -> u32 {
        1
    }

    fn weekday_name(&self, weekday: u32) -> WeekdayName {
        let full = WEEKDAY_NAMES[((weekday + 6) % 7) as usize];
        WeekdayName {
            short_name: full[..3].to_string(),
            full_name: full.to_string(),
        }
    }
}

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use weekcal_core::calendar::parse_tz;
///
/// let tz = parse_tz("Europe/Berlin").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Berlin");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

/// Convert a local datetime in a specific timezone to UTC.
///
/// Ambiguous times (fall back) resolve to the earlier occurrence.
/// Nonexistent times (spring forward) move forward to the first valid
/// local minute. Returns `None` only if no valid time exists within a day.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    let resolved = tz.from_local_datetime(&local);
    if let Some(dt) = resolved.single().or_else(|| resolved.earliest()) {
        return Some(dt.with_timezone(&Utc));
    }

    (1..=24 * 60).find_map(|minutes| {
        let candidate = local + chrono::Duration::minutes(minutes);
        tz.from_local_datetime(&candidate)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Format a datetime as RFC3339 with timezone offset
/// (e.g. "2026-03-29T00:00:00+01:00").
pub fn format_rfc3339<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
