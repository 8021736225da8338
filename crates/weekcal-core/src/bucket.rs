//! Event bucketing.
//!
//! Events are assigned to every calendar day they touch. Days are compared
//! as ordinal days (`year * 366 + day_of_year`) rather than instants, so an
//! event ending at 00:30 lands on that day no matter how the timezone
//! offset falls.

use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::CalendarType;
use crate::error::Result;
use crate::models::{CalendarEvent, DateParts, OrdinalDay};

/// Saturday and Sunday, as bits `weekday % 7`.
pub const DEFAULT_WEEKEND_MASK: u32 = 65;

/// One calendar day of a rendered window and the events touching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: DateParts,
    pub is_today: bool,
    pub is_weekend: bool,
    pub events: Vec<CalendarEvent>,
}

impl DayBucket {
    /// An empty bucket for `date`.
    pub fn new(date: DateParts, today: OrdinalDay, weekend_mask: u32, days_per_week: u32) -> Self {
        Self {
            date,
            is_today: date.ordinal() == today,
            is_weekend: is_weekend(date.weekday, weekend_mask, days_per_week),
            events: Vec::new(),
        }
    }
}

/// Whether the weekend bitmask has the bit for `weekday % days_per_week` set.
pub fn is_weekend(weekday: u32, weekend_mask: u32, days_per_week: u32) -> bool {
    if days_per_week == 0 {
        return false;
    }
    1u32.checked_shl(weekday % days_per_week)
        .is_some_and(|bit| weekend_mask & bit != 0)
}

/// The dates of the week containing `reference`, starting at weekday 1.
pub fn week_dates<C: CalendarType + ?Sized>(reference: i64, calendar: &C) -> Result<Vec<DateParts>> {
    let date = calendar.timestamp_to_date_parts(reference)?;
    let first_day = i64::from(date.day) - (i64::from(date.weekday) - 1);

    (0..i64::from(calendar.weekdays_per_week()))
        .map(|offset| -> Result<DateParts> {
            let ts = calendar.date_parts_to_timestamp(date.year, date.month, first_day + offset, 0)?;
            calendar.timestamp_to_date_parts(ts)
        })
        .collect()
}

/// Fill each bucket with the events whose `[start day, end day]` range
/// contains the bucket's day (inclusive at both ends).
///
/// Events with a missing start or end, or with instants the calendar cannot
/// represent, are skipped with a warning. Returns the number skipped.
pub fn bucket_events<C: CalendarType + ?Sized>(
    buckets: &mut [DayBucket],
    events: &[CalendarEvent],
    calendar: &C,
) -> usize {
    let mut spans: Vec<(i64, i64, &CalendarEvent)> = Vec::with_capacity(events.len());
    let mut skipped = 0;

    for event in events {
        match event_day_range(event, calendar) {
            Ok((first, last)) => spans.push((first.key(), last.key(), event)),
            Err(e) => {
                warn!(error = %e, "skipping malformed event");
                skipped += 1;
            }
        }
    }

    for bucket in buckets.iter_mut() {
        let day = bucket.date.ordinal().key();
        bucket.events.extend(
            spans
                .iter()
                .filter(|(first, last, _)| *first <= day && day <= *last)
                .map(|(_, _, event)| (*event).clone()),
        );
    }

    debug!(
        days = buckets.len(),
        events = events.len(),
        skipped,
        "bucketed events"
    );
    skipped
}

fn event_day_range<C: CalendarType + ?Sized>(
    event: &CalendarEvent,
    calendar: &C,
) -> Result<(OrdinalDay, OrdinalDay)> {
    let (start, end) = event.times()?;
    let first = calendar.timestamp_to_date_parts(start)?.ordinal();
    let last = calendar.timestamp_to_date_parts(end)?.ordinal();
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GregorianCalendar;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .unwrap()
            .timestamp()
    }

    fn week_buckets(calendar: &GregorianCalendar, reference: i64, now: i64) -> Vec<DayBucket> {
        let today = calendar.timestamp_to_date_parts(now).unwrap().ordinal();
        week_dates(reference, calendar)
            .unwrap()
            .into_iter()
            .map(|date| DayBucket::new(date, today, DEFAULT_WEEKEND_MASK, 7))
            .collect()
    }

    #[test]
    fn week_dates_start_on_monday() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        // Sunday 2026-03-08 belongs to the week of Monday 2026-03-02.
        let dates = week_dates(ts(2026, 3, 8, 18, 0), &calendar).unwrap();

        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0].day, 2);
        assert_eq!(dates[0].weekday, 1);
        assert_eq!(dates[6].day, 8);
        assert_eq!(dates[6].weekday, 7);
    }

    #[test]
    fn week_dates_cross_month_and_year() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let dates = week_dates(ts(2026, 1, 1, 12, 0), &calendar).unwrap();

        let days: Vec<_> = dates.iter().map(|d| (d.year, d.month, d.day)).collect();
        assert_eq!(days[0], (2025, 12, 29));
        assert_eq!(days[2], (2025, 12, 31));
        assert_eq!(days[3], (2026, 1, 1));
        assert_eq!(days[6], (2026, 1, 4));
    }

    #[test]
    fn weekend_and_today_flags() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 5, 7, 0));

        let weekend: Vec<_> = buckets.iter().map(|b| b.is_weekend).collect();
        assert_eq!(weekend, vec![false, false, false, false, false, true, true]);

        let today: Vec<_> = buckets.iter().map(|b| b.is_today).collect();
        assert_eq!(today, vec![false, false, false, true, false, false, false]);
    }

    #[test]
    fn is_weekend_uses_mask_modulo_week_length() {
        // Bit 5 only: Fridays.
        assert!(is_weekend(5, 1 << 5, 7));
        assert!(!is_weekend(6, 1 << 5, 7));
        // Sunday (7) maps to bit 0.
        assert!(is_weekend(7, 1, 7));
        assert!(!is_weekend(7, 1, 0));
    }

    #[test]
    fn event_before_week_is_excluded_everywhere() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let mut buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 4, 12, 0));
        let events = vec![CalendarEvent::new(
            "old",
            "Last week",
            ts(2026, 2, 23, 9, 0),
            ts(2026, 3, 1, 23, 59),
        )];

        bucket_events(&mut buckets, &events, &calendar);
        assert!(buckets.iter().all(|b| b.events.is_empty()));
    }

    #[test]
    fn event_spanning_the_week_is_in_every_day_once() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let mut buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 4, 12, 0));
        let events = vec![
            CalendarEvent::new("long", "Project", ts(2026, 2, 20, 9, 0), ts(2026, 3, 20, 17, 0)),
            CalendarEvent::new("short", "Lecture", ts(2026, 3, 4, 10, 0), ts(2026, 3, 4, 11, 0)),
        ];

        bucket_events(&mut buckets, &events, &calendar);
        for bucket in &buckets {
            let count = bucket.events.iter().filter(|e| e.id == "long").count();
            assert_eq!(count, 1);
        }
        assert_eq!(buckets[2].events.len(), 2);
        assert_eq!(buckets[2].events[1].id, "short");
        assert_eq!(buckets[3].events.len(), 1);
    }

    #[test]
    fn event_ending_just_after_midnight_touches_both_days() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let mut buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 4, 12, 0));
        let events = vec![CalendarEvent::new(
            "night",
            "Night shift",
            ts(2026, 3, 4, 23, 30),
            ts(2026, 3, 5, 0, 30),
        )];

        bucket_events(&mut buckets, &events, &calendar);
        let hits: Vec<_> = buckets.iter().map(|b| b.events.len()).collect();
        assert_eq!(hits, vec![0, 0, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn days_are_compared_in_the_calendar_timezone() {
        // 23:30Z on Tuesday is already Wednesday in Berlin.
        let calendar = GregorianCalendar::from_tz_name("Europe/Berlin").unwrap();
        let mut buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 4, 12, 0));
        let events = vec![CalendarEvent::new(
            "late",
            "Late",
            ts(2026, 3, 3, 23, 30),
            ts(2026, 3, 3, 23, 45),
        )];

        bucket_events(&mut buckets, &events, &calendar);
        assert!(buckets[1].events.is_empty());
        assert_eq!(buckets[2].events.len(), 1);
    }

    #[test]
    fn malformed_events_are_skipped_not_fatal() {
        let calendar = GregorianCalendar::from_tz_name("UTC").unwrap();
        let mut buckets = week_buckets(&calendar, ts(2026, 3, 4, 12, 0), ts(2026, 3, 4, 12, 0));
        let mut missing_start = CalendarEvent::new("a", "A", 0, ts(2026, 3, 4, 11, 0));
        missing_start.time_start = None;
        let out_of_range = CalendarEvent::new("b", "B", i64::MAX - 1, i64::MAX);
        let good = CalendarEvent::new("c", "C", ts(2026, 3, 4, 10, 0), ts(2026, 3, 4, 11, 0));

        let skipped = bucket_events(&mut buckets, &[missing_start, out_of_range, good], &calendar);
        assert_eq!(skipped, 2);
        assert_eq!(buckets[2].events.len(), 1);
        assert_eq!(buckets[2].events[0].id, "c");
    }
}
