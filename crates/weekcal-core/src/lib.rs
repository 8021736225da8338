//! # weekcal-core
//!
//! Date bucketing and geometry layout for a week calendar that renders both
//! on screen and to PDF.
//!
//! ## Features
//!
//! - **Time windows**: day, week, month and upcoming windows, each ending one
//!   second before the next period, computed in local calendar days.
//! - **Ordinal-day bucketing**: events land on every day they touch, compared
//!   by `(year, day_of_year)` instead of raw instants.
//! - **Dual layout**: one parameterised algorithm places events in screen
//!   pixels and PDF units from two [`layout::CanvasProfile`]s.
//! - **Period labels**: `"30 March - 05 April 2026"` style week names.
//! - **Pluggable calendars**: everything goes through [`CalendarType`] and
//!   [`DateFormatter`]; [`GregorianCalendar`] covers IANA timezones.
//!
//! ## Example
//!
//! ```rust
//! use weekcal_core::prelude::*;
//!
//! let calendar = GregorianCalendar::from_tz_name("Europe/Paris").unwrap();
//! let reference = parse_instant("2026-03-04T12:00:00Z", TimestampFormat::Rfc3339).unwrap();
//! let events = vec![CalendarEvent::new(
//!     "42",
//!     "Lecture",
//!     parse_instant("2026-03-04T09:00:00Z", TimestampFormat::Rfc3339).unwrap(),
//!     parse_instant("2026-03-04T10:30:00Z", TimestampFormat::Rfc3339).unwrap(),
//! )];
//!
//! let counter = InstanceCounter::new();
//! let request = WeekViewRequest {
//!     reference,
//!     now: reference,
//!     weekend_mask: DEFAULT_WEEKEND_MASK,
//! };
//! let view = assemble_week_view(&request, &events, &calendar, &calendar, &counter).unwrap();
//!
//! assert_eq!(view.period_name, "02 - 08 March 2026");
//! // 10:00 Paris time is two hours into the grid.
//! assert_eq!(view.week.days[2].events[0].layout.screen.top_css(), "160px");
//! ```

pub mod bucket;
pub mod calendar;
pub mod config;
pub mod error;
pub mod label;
pub mod layout;
pub mod models;
pub mod parse;
pub mod view;
pub mod window;

// Re-export commonly used types at the crate root
pub use bucket::{DEFAULT_WEEKEND_MASK, DayBucket, bucket_events, week_dates};
pub use calendar::{CalendarType, GregorianCalendar, WeekdayName};
pub use config::CalendarConfig;
pub use error::{CalendarError, Result};
pub use label::{DateFormatter, format_period_label};
pub use layout::{CanvasProfile, EventLayout, LayoutSpan, PDF, SCREEN, Visibility, layout_event};
pub use models::{CalendarEvent, DateParts, OrdinalDay, TimeWindow, ViewKind};
pub use parse::{TimestampFormat, parse_instant};
pub use view::{InstanceCounter, WeekView, WeekViewRequest, assemble_week_view};
pub use window::{resolve_window, select_events, week_start};

/// Prelude module for convenient imports.
///
/// ```
/// use weekcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucket::{DEFAULT_WEEKEND_MASK, DayBucket, bucket_events, week_dates};
    pub use crate::calendar::{CalendarType, GregorianCalendar, parse_tz};
    pub use crate::config::CalendarConfig;
    pub use crate::error::{CalendarError, Result};
    pub use crate::label::{DateFormatter, format_period_label};
    pub use crate::layout::{
        CanvasProfile, EventLayout, LayoutSpan, PDF, SCREEN, Visibility, compute_span,
        layout_event,
    };
    pub use crate::models::*;
    pub use crate::parse::{TimestampFormat, parse_instant};
    pub use crate::view::*;
    pub use crate::window::{resolve_window, select_events, week_start};
}
