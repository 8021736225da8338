//! Week view assembly.
//!
//! Wires window resolution, bucketing, layout and period labels into the
//! single structure a template renderer consumes for one render call.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::bucket::{DayBucket, bucket_events, week_dates};
use crate::calendar::{CalendarType, WeekdayName};
use crate::error::Result;
use crate::label::{DateFormatter, format_period_label};
use crate::layout::{EventLayout, layout_calendar_event};
use crate::models::{CalendarEvent, DateParts, TimeWindow, ViewKind};
use crate::window::{resolve_window, week_start};

/// Hands out calendar instance ids, used to keep several calendar widgets
/// on one page apart. Owned by the application and shared by reference.
#[derive(Debug, Default)]
pub struct InstanceCounter {
    issued: AtomicU64,
}

impl InstanceCounter {
    pub const fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
        }
    }

    /// Next id; the first call returns 1.
    pub fn next_id(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// An event on one day column, with its placement on that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    #[serde(flatten)]
    pub event: CalendarEvent,
    /// Seconds between start and end.
    pub time_duration: i64,
    pub layout: EventLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay {
    pub date: DateParts,
    pub is_today: bool,
    pub is_weekend: bool,
    pub events: Vec<PlacedEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekWindow {
    pub days: Vec<WeekDay>,
}

/// A navigable week: where it starts and what it is called.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodNav {
    pub start: i64,
    pub date: DateParts,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayName {
    pub day_no: u32,
    #[serde(flatten)]
    pub name: WeekdayName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub calendar_instance_id: u64,
    pub view: ViewKind,
    /// Parts of the reference instant.
    pub date: DateParts,
    pub window: TimeWindow,
    pub period_name: String,
    pub current: PeriodNav,
    pub previous: PeriodNav,
    pub next: PeriodNav,
    pub day_names: Vec<DayName>,
    pub week: WeekWindow,
}

/// Inputs of one week render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekViewRequest {
    /// Instant being viewed.
    pub reference: i64,
    /// Current instant, for the "today" highlight.
    pub now: i64,
    pub weekend_mask: u32,
}

/// Build the week view for `request`.
///
/// `events` should already be limited to the week window; anything outside
/// it simply lands in no bucket. Each day column uses its own date as the
/// reference day when placing events.
pub fn assemble_week_view<C, F>(
    request: &WeekViewRequest,
    events: &[CalendarEvent],
    calendar: &C,
    formatter: &F,
    counter: &InstanceCounter,
) -> Result<WeekView>
where
    C: CalendarType + ?Sized,
    F: DateFormatter + ?Sized,
{
    let date = calendar.timestamp_to_date_parts(request.reference)?;
    let window = resolve_window(request.reference, ViewKind::Week, calendar, 0)?;
    let today = calendar.timestamp_to_date_parts(request.now)?.ordinal();
    let days_per_week = calendar.weekdays_per_week();

    let mut buckets: Vec<DayBucket> = week_dates(request.reference, calendar)?
        .into_iter()
        .map(|day| DayBucket::new(day, today, request.weekend_mask, days_per_week))
        .collect();
    bucket_events(&mut buckets, events, calendar);

    let days = buckets
        .into_iter()
        .map(|bucket| place_events(bucket, calendar))
        .collect::<Result<Vec<_>>>()?;

    let current = period_nav(request.reference, 0, calendar, formatter)?;
    let previous = period_nav(request.reference, -1, calendar, formatter)?;
    let next = period_nav(request.reference, 1, calendar, formatter)?;

    let calendar_instance_id = counter.next_id();
    debug!(
        calendar_instance_id,
        period = %current.label,
        "assembled week view"
    );

    Ok(WeekView {
        calendar_instance_id,
        view: ViewKind::Week,
        date,
        window,
        period_name: current.label.clone(),
        current,
        previous,
        next,
        day_names: day_names(calendar),
        week: WeekWindow { days },
    })
}

/// Lay out every event of a bucket against the bucket's own day.
pub fn place_events<C: CalendarType + ?Sized>(bucket: DayBucket, calendar: &C) -> Result<WeekDay> {
    let reference = bucket.date.ordinal();
    let events = bucket
        .events
        .into_iter()
        .map(|event| -> Result<PlacedEvent> {
            let (start, end) = event.times()?;
            let layout = layout_calendar_event(&event, reference, calendar)?;
            Ok(PlacedEvent {
                event,
                time_duration: end - start,
                layout,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WeekDay {
        date: bucket.date,
        is_today: bucket.is_today,
        is_weekend: bucket.is_weekend,
        events,
    })
}

/// Day headers in display order, starting at the calendar's first weekday.
pub fn day_names<C: CalendarType + ?Sized>(calendar: &C) -> Vec<DayName> {
    let count = calendar.weekdays_per_week();
    let first = calendar.first_weekday_of_week();

    (0..count)
        .map(|i| {
            let day_no = (first - 1 + i) % count + 1;
            DayName {
                day_no,
                name: calendar.weekday_name(day_no),
            }
        })
        .collect()
}

fn period_nav<C, F>(reference: i64, weeks: i64, calendar: &C, formatter: &F) -> Result<PeriodNav>
where
    C: CalendarType + ?Sized,
    F: DateFormatter + ?Sized,
{
    let start = week_start(reference, weeks, calendar)?;
    Ok(PeriodNav {
        start,
        date: calendar.timestamp_to_date_parts(start)?,
        label: format_period_label(start, formatter)?,
    })
}
