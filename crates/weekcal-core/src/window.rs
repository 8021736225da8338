//! Time window resolution.
//!
//! A window is the inclusive range of instants one calendar view covers.
//! Boundaries are computed in local calendar days through the
//! [`CalendarType`] and converted independently, so DST transitions inside
//! a window shorten or lengthen it instead of shifting its edges. Every
//! window ends one second before the next period begins.

use tracing::{debug, warn};

use crate::calendar::CalendarType;
use crate::error::Result;
use crate::models::{CalendarEvent, TimeWindow, ViewKind};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Resolve the window a view covers around a reference instant.
///
/// # Arguments
///
/// * `reference` - The instant being viewed (epoch seconds)
/// * `view` - The view kind
/// * `calendar` - The calendar type used for day arithmetic
/// * `lookahead_days` - Window length of the upcoming view
///
/// # Examples
///
/// ```
/// use weekcal_core::calendar::GregorianCalendar;
/// use weekcal_core::models::ViewKind;
/// use weekcal_core::window::resolve_window;
///
/// let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
/// // Wednesday 2026-03-04 12:00:00Z
/// let window = resolve_window(1_772_625_600, ViewKind::Week, &calendar, 21).unwrap();
///
/// assert_eq!(window.start, 1_772_409_600); // Monday 2026-03-02 00:00:00Z
/// assert_eq!(window.end, 1_773_014_399); // Sunday 2026-03-08 23:59:59Z
/// ```
pub fn resolve_window<C: CalendarType + ?Sized>(
    reference: i64,
    view: ViewKind,
    calendar: &C,
    lookahead_days: u32,
) -> Result<TimeWindow> {
    let date = calendar.timestamp_to_date_parts(reference)?;
    let day = i64::from(date.day);

    let (start, next_period_start) = match view {
        ViewKind::Day => (
            calendar.date_parts_to_timestamp(date.year, date.month, day, 0)?,
            calendar.date_parts_to_timestamp(date.year, date.month, day + 1, 0)?,
        ),
        ViewKind::Week => {
            let first_day = day - (i64::from(date.weekday) - 1);
            let week_length = i64::from(calendar.weekdays_per_week());
            (
                calendar.date_parts_to_timestamp(date.year, date.month, first_day, 0)?,
                calendar.date_parts_to_timestamp(
                    date.year,
                    date.month,
                    first_day + week_length,
                    0,
                )?,
            )
        }
        ViewKind::Month => {
            let month_length = i64::from(calendar.days_in_month(date.year, date.month)?);
            (
                calendar.date_parts_to_timestamp(date.year, date.month, 1, 0)?,
                calendar.date_parts_to_timestamp(date.year, date.month, 1 + month_length, 0)?,
            )
        }
        ViewKind::Upcoming => {
            // Same local wall-clock time `lookahead_days` calendar days later.
            let within_hour = i64::from(date.minute) * 60 + reference.rem_euclid(60);
            let later = calendar.date_parts_to_timestamp(
                date.year,
                date.month,
                day + i64::from(lookahead_days),
                date.hour,
            )?;
            (reference, later + within_hour)
        }
    };

    let window = TimeWindow {
        start,
        end: next_period_start - 1,
    };
    debug!(%view, reference, start = window.start, end = window.end, "resolved window");
    Ok(window)
}

/// Start of the week containing `reference`, shifted by `weeks` whole weeks.
///
/// Shifting happens in calendar days, so the result is always local
/// midnight of weekday 1.
pub fn week_start<C: CalendarType + ?Sized>(reference: i64, weeks: i64, calendar: &C) -> Result<i64> {
    let date = calendar.timestamp_to_date_parts(reference)?;
    let first_day = i64::from(date.day) - (i64::from(date.weekday) - 1);
    let offset = weeks * i64::from(calendar.weekdays_per_week());
    calendar.date_parts_to_timestamp(date.year, date.month, first_day + offset, 0)
}

/// Pick the events overlapping a window, ordered by start instant.
///
/// This is the in-memory counterpart of an event source query. Malformed
/// events are skipped with a warning. `limit` caps the number of events
/// returned (the upcoming view shows a bounded list).
pub fn select_events(
    events: &[CalendarEvent],
    window: TimeWindow,
    limit: Option<usize>,
) -> Vec<CalendarEvent> {
    let mut selected: Vec<(i64, &CalendarEvent)> = Vec::new();

    for event in events {
        match event.times() {
            Ok((start, end)) => {
                if window.overlaps(start, end) {
                    selected.push((start, event));
                }
            }
            Err(e) => warn!(error = %e, "skipping event"),
        }
    }

    selected.sort_by_key(|(start, _)| *start);
    if let Some(limit) = limit {
        selected.truncate(limit);
    }

    selected.into_iter().map(|(_, event)| event.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GregorianCalendar;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .unwrap()
            .timestamp()
    }

    fn utc() -> GregorianCalendar {
        GregorianCalendar::from_tz_name("UTC").unwrap()
    }

    #[test]
    fn day_window() {
        let window = resolve_window(ts(2026, 3, 4, 15, 20, 0), ViewKind::Day, &utc(), 21).unwrap();
        assert_eq!(window.start, ts(2026, 3, 4, 0, 0, 0));
        assert_eq!(window.end, ts(2026, 3, 4, 23, 59, 59));
    }

    #[test]
    fn week_window_from_sunday_stays_in_its_week() {
        // 2026-03-08 is a Sunday; its week starts Monday 2026-03-02.
        let window = resolve_window(ts(2026, 3, 8, 22, 0, 0), ViewKind::Week, &utc(), 21).unwrap();
        assert_eq!(window.start, ts(2026, 3, 2, 0, 0, 0));
        assert_eq!(window.end, ts(2026, 3, 8, 23, 59, 59));
    }

    #[test]
    fn week_window_across_year_end() {
        // Thursday 2026-01-01 belongs to the week of Monday 2025-12-29.
        let window = resolve_window(ts(2026, 1, 1, 9, 0, 0), ViewKind::Week, &utc(), 21).unwrap();
        assert_eq!(window.start, ts(2025, 12, 29, 0, 0, 0));
        assert_eq!(window.end, ts(2026, 1, 4, 23, 59, 59));
    }

    #[test]
    fn month_window_in_leap_february() {
        let window = resolve_window(ts(2024, 2, 10, 8, 0, 0), ViewKind::Month, &utc(), 21).unwrap();
        assert_eq!(window.start, ts(2024, 2, 1, 0, 0, 0));
        assert_eq!(window.end, ts(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn month_window_december() {
        let window = resolve_window(ts(2026, 12, 15, 8, 0, 0), ViewKind::Month, &utc(), 21).unwrap();
        assert_eq!(window.start, ts(2026, 12, 1, 0, 0, 0));
        assert_eq!(window.end, ts(2026, 12, 31, 23, 59, 59));
    }

    #[test]
    fn upcoming_window_starts_at_reference() {
        let reference = ts(2026, 3, 4, 15, 20, 0);
        let window = resolve_window(reference, ViewKind::Upcoming, &utc(), 3).unwrap();
        assert_eq!(window.start, reference);
        assert_eq!(window.end, ts(2026, 3, 7, 15, 19, 59));
    }

    #[test]
    fn upcoming_window_keeps_wall_clock_across_dst() {
        // 12:00 CET on 2026-03-20; 21 days later is 12:00 CEST on 2026-04-10.
        let calendar = GregorianCalendar::from_tz_name("Europe/Berlin").unwrap();
        let reference = ts(2026, 3, 20, 11, 0, 0);
        let window = resolve_window(reference, ViewKind::Upcoming, &calendar, 21).unwrap();

        assert_eq!(window.start, reference);
        assert_eq!(window.end, ts(2026, 4, 10, 9, 59, 59));
        assert_eq!(window.end - window.start + 1, 21 * SECONDS_PER_DAY - 3600);
    }

    #[test]
    fn upcoming_window_keeps_minutes_and_seconds() {
        let calendar = GregorianCalendar::from_tz_name("Europe/Berlin").unwrap();
        let reference = ts(2026, 3, 20, 11, 47, 13);
        let window = resolve_window(reference, ViewKind::Upcoming, &calendar, 1).unwrap();
        assert_eq!(window.end, ts(2026, 3, 21, 11, 47, 12));
    }

    #[test]
    fn week_window_across_dst_change() {
        // Berlin springs forward on Sunday 2026-03-29; that week is 167 hours.
        let calendar = GregorianCalendar::from_tz_name("Europe/Berlin").unwrap();
        let window = resolve_window(ts(2026, 3, 25, 12, 0, 0), ViewKind::Week, &calendar, 21).unwrap();
        assert_eq!(window.start, ts(2026, 3, 22, 23, 0, 0));
        assert_eq!(window.end, ts(2026, 3, 29, 21, 59, 59));
        assert_eq!(window.end - window.start + 1, 167 * 3600);
    }

    #[test]
    fn week_start_shifts_by_whole_weeks() {
        let reference = ts(2026, 3, 4, 15, 20, 0);
        let calendar = utc();
        assert_eq!(week_start(reference, 0, &calendar).unwrap(), ts(2026, 3, 2, 0, 0, 0));
        assert_eq!(week_start(reference, -1, &calendar).unwrap(), ts(2026, 2, 23, 0, 0, 0));
        assert_eq!(week_start(reference, 1, &calendar).unwrap(), ts(2026, 3, 9, 0, 0, 0));
    }

    #[test]
    fn select_events_filters_sorts_and_limits() {
        let window = TimeWindow {
            start: ts(2026, 3, 2, 0, 0, 0),
            end: ts(2026, 3, 8, 23, 59, 59),
        };
        let mut broken = CalendarEvent::new("broken", "No end", ts(2026, 3, 3, 9, 0, 0), 0);
        broken.time_end = None;
        let events = vec![
            CalendarEvent::new("late", "Late", ts(2026, 3, 6, 9, 0, 0), ts(2026, 3, 6, 10, 0, 0)),
            CalendarEvent::new("before", "Before", ts(2026, 2, 20, 9, 0, 0), ts(2026, 2, 20, 10, 0, 0)),
            broken,
            CalendarEvent::new("early", "Early", ts(2026, 3, 2, 9, 0, 0), ts(2026, 3, 2, 10, 0, 0)),
            CalendarEvent::new("spanning", "Span", ts(2026, 2, 28, 9, 0, 0), ts(2026, 3, 3, 10, 0, 0)),
        ];

        let ids: Vec<_> = select_events(&events, window, None)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["spanning", "early", "late"]);

        let limited = select_events(&events, window, Some(2));
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].id, "early");
    }
}
