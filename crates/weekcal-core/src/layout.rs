//! Dual coordinate layout engine.
//!
//! An event placed on a day column gets a top offset and a height in two
//! independent unit systems: screen pixels for the HTML view and PDF units
//! for the printed week. Both run through [`compute_span`]; the only
//! difference between them is the [`CanvasProfile`] they are given.
//!
//! The grid starts at [`DAY_ORIGIN_HOUR`]. Anything earlier clamps to the
//! top of the canvas, anything past the canvas clamps to its bottom.

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::calendar::CalendarType;
use crate::error::Result;
use crate::models::{CalendarEvent, DateParts, OrdinalDay};

/// Hour at which the day grid starts (08:00).
pub const DAY_ORIGIN_HOUR: u32 = 8;

/// Unit-specific geometry constants for one rendering target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasProfile {
    /// Suffix appended to emitted values.
    pub unit: &'static str,
    pub units_per_hour: f64,
    pub day_origin_hour: u32,
    /// Largest top offset; later starts clamp here.
    pub max_top: f64,
    /// Height of a full day column; bottom offsets clamp here.
    pub day_height: f64,
    /// Heights under this are snapped to `default_height`.
    pub min_visible_height: f64,
    pub default_height: f64,
    /// Taken off the bottom edge whenever it differs from the top edge.
    pub border_correction: f64,
    /// Taken off the height when the height exceeds it.
    pub content_box_correction: f64,
    /// Taken off the height unconditionally.
    pub outer_border_correction: f64,
}

/// Browser canvas: 80px per hour, 13 hour rows.
pub const SCREEN: CanvasProfile = CanvasProfile {
    unit: "px",
    units_per_hour: 80.0,
    day_origin_hour: DAY_ORIGIN_HOUR,
    max_top: 960.0,
    day_height: 1040.0,
    min_visible_height: 40.0,
    default_height: 80.0,
    border_correction: 0.0,
    content_box_correction: 0.0,
    outer_border_correction: 0.0,
};

/// Printed A4 landscape page. The three corrections are tuned against the
/// HTML-to-PDF engine's box model.
pub const PDF: CanvasProfile = CanvasProfile {
    unit: "px",
    units_per_hour: 51.0,
    day_origin_hour: DAY_ORIGIN_HOUR,
    max_top: 612.0,
    day_height: 663.0,
    min_visible_height: 20.0,
    default_height: 46.0,
    border_correction: 2.0,
    content_box_correction: 3.0,
    outer_border_correction: 2.0,
};

impl CanvasProfile {
    /// Offset of a time of day from the grid origin, unclamped.
    pub fn offset_of(&self, parts: &DateParts) -> f64 {
        let hours = f64::from(parts.hour) - f64::from(self.day_origin_hour)
            + f64::from(parts.minute) / 60.0;
        hours * self.units_per_hour
    }
}

/// Whether a span is drawn. Events that end before the grid origin get
/// a negative height and are hidden rather than dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    /// Inline style fragment for the template.
    pub fn css(&self) -> &'static str {
        match self {
            Visibility::Visible => "",
            Visibility::Hidden => "visibility: hidden;",
        }
    }
}

/// Placement of one event on one day column in one unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpan {
    pub top: f64,
    pub height: f64,
    pub visibility: Visibility,
    pub unit: &'static str,
}

impl LayoutSpan {
    /// Top offset with its unit suffix, e.g. `"160px"`.
    pub fn top_css(&self) -> String {
        format!("{}{}", self.top, self.unit)
    }

    /// Height with its unit suffix, e.g. `"69.5px"`.
    ///
    /// Hidden PDF spans render a negative height here; the visibility style
    /// keeps them off the page.
    pub fn height_css(&self) -> String {
        format!("{}{}", self.height, self.unit)
    }

    /// Returns `true` if the span carries `visibility: hidden`.
    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }
}

impl Serialize for LayoutSpan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LayoutSpan", 6)?;
        state.serialize_field("top", &self.top_css())?;
        state.serialize_field("height", &self.height_css())?;
        state.serialize_field("top_value", &self.top)?;
        state.serialize_field("height_value", &self.height)?;
        state.serialize_field("visibility", &self.visibility)?;
        state.serialize_field("visibility_style", self.visibility.css())?;
        state.end()
    }
}

/// Screen and PDF placement of one event on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventLayout {
    pub screen: LayoutSpan,
    pub pdf: LayoutSpan,
}

/// Place an event on the `reference` day in one unit system.
///
/// An edge only gets a time-based offset when it falls on the reference
/// day: a start on an earlier day pins the top to 0, an end on a later day
/// pins the bottom to the full column height.
///
/// # Arguments
///
/// * `profile` - Unit system and clamps of the target canvas
/// * `start` - Local date parts of the event start
/// * `end` - Local date parts of the event end
/// * `reference` - The day column being rendered
///
/// # Returns
///
/// The clamped top and height; spans ending before the grid origin come
/// back hidden.
///
/// # Examples
///
/// ```
/// use weekcal_core::layout::{SCREEN, compute_span};
/// use weekcal_core::models::DateParts;
///
/// let at = |hour, minute| DateParts {
///     timestamp: 0, year: 2026, month: 3, day: 4, weekday: 3,
///     day_of_year: 63, hour, minute,
/// };
/// let span = compute_span(&SCREEN, &at(10, 0), &at(11, 30), at(0, 0).ordinal());
///
/// assert_eq!(span.top_css(), "160px");
/// assert_eq!(span.height_css(), "120px");
/// ```
pub fn compute_span(
    profile: &CanvasProfile,
    start: &DateParts,
    end: &DateParts,
    reference: OrdinalDay,
) -> LayoutSpan {
    let mut top = if start.ordinal() == reference {
        profile.offset_of(start)
    } else {
        0.0
    };
    let mut bottom = if end.ordinal() == reference {
        profile.offset_of(end)
    } else {
        profile.day_height
    };

    if bottom != top {
        bottom -= profile.border_correction;
    }

    top = top.clamp(0.0, profile.max_top);
    bottom = bottom.min(profile.day_height);

    let mut height = bottom - top;
    let mut visibility = Visibility::Visible;
    if height < 0.0 {
        height = 0.0;
        visibility = Visibility::Hidden;
    } else if height < profile.min_visible_height {
        height = profile.default_height;
    }

    if profile.content_box_correction > 0.0 && height > profile.content_box_correction {
        height -= profile.content_box_correction;
    }
    height -= profile.outer_border_correction;

    LayoutSpan {
        top,
        height,
        visibility,
        unit: profile.unit,
    }
}

/// Place an event on the `reference` day in both unit systems.
pub fn layout_event(start: &DateParts, end: &DateParts, reference: OrdinalDay) -> EventLayout {
    EventLayout {
        screen: compute_span(&SCREEN, start, end, reference),
        pdf: compute_span(&PDF, start, end, reference),
    }
}

/// Convenience over [`layout_event`] that breaks the event's instants down
/// with `calendar` first.
pub fn layout_calendar_event<C: CalendarType + ?Sized>(
    event: &CalendarEvent,
    reference: OrdinalDay,
    calendar: &C,
) -> Result<EventLayout> {
    let (start, end) = event.times()?;
    let start = calendar.timestamp_to_date_parts(start)?;
    let end = calendar.timestamp_to_date_parts(end)?;
    Ok(layout_event(&start, &end, reference))
}
