//! Period labels for seven-day navigation headers.

use crate::calendar::GregorianCalendar;
use crate::error::Result;
use crate::window::SECONDS_PER_DAY;

/// Locale-aware date formatting, using strftime-style patterns.
pub trait DateFormatter {
    fn format(&self, ts: i64, pattern: &str) -> Result<String>;
}

impl DateFormatter for GregorianCalendar {
    fn format(&self, ts: i64, pattern: &str) -> Result<String> {
        Ok(self.local(ts)?.format(pattern).to_string())
    }
}

/// Label for the seven days starting at `start`, e.g. `"02 - 08 March 2026"`.
///
/// Month and year are only repeated when the period crosses them:
/// `"30 March - 05 April 2026"`, `"29 December 2025 - 04 January 2026"`.
///
/// # Arguments
///
/// * `start` - First instant of the period (local midnight of its first day)
/// * `formatter` - Renders day, month name and year in the user's locale
pub fn format_period_label<F: DateFormatter + ?Sized>(start: i64, formatter: &F) -> Result<String> {
    let end = start + 6 * SECONDS_PER_DAY;

    let start_day = formatter.format(start, "%d")?;
    let end_day = formatter.format(end, "%d")?;
    let start_month = formatter.format(start, "%B")?;
    let end_month = formatter.format(end, "%B")?;
    let start_year = formatter.format(start, "%Y")?;
    let end_year = formatter.format(end, "%Y")?;

    let label = if start_month == end_month {
        format!("{start_day} - {end_day} {start_month} {start_year}")
    } else if start_year == end_year {
        format!("{start_day} {start_month} - {end_day} {end_month} {start_year}")
    } else {
        format!("{start_day} {start_month} {start_year} - {end_day} {end_month} {end_year}")
    };
    Ok(label)
}
