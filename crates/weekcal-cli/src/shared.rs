use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;
use weekcal_core::calendar::format_rfc3339;
use weekcal_core::{
    CalendarConfig, CalendarEvent, GregorianCalendar, TimestampFormat, ViewKind, parse_instant,
};

use crate::error::{CliError, CliResult};

/// Config file (or defaults) with the `--tz` flag applied on top.
pub fn load_settings(config: Option<&Path>, tz: Option<&str>) -> CliResult<CalendarConfig> {
    let mut settings = match config {
        Some(path) => CalendarConfig::load(path)?,
        None => CalendarConfig::default(),
    };

    if let Some(tz) = tz {
        settings.timezone = tz.to_string();
    }
    // Validates an overridden timezone too.
    settings.calendar()?;

    debug!(?settings, "effective settings");
    Ok(settings)
}

pub fn parse_format(s: &str) -> CliResult<TimestampFormat> {
    Ok(s.parse::<TimestampFormat>()?)
}

pub fn parse_view(s: &str) -> CliResult<ViewKind> {
    Ok(s.parse::<ViewKind>()?)
}

pub fn parse_time(s: &str, format: TimestampFormat, what: &str) -> CliResult<i64> {
    parse_instant(s, format).map_err(|e| CliError::input(format!("Invalid {}: {}", what, e)))
}

/// RFC3339 rendering of an instant in the calendar's timezone.
pub fn format_local(calendar: &GregorianCalendar, ts: i64) -> CliResult<String> {
    Ok(format_rfc3339(&calendar.local(ts)?))
}

pub fn open_input(input: &str, stdin: bool) -> CliResult<Box<dyn BufRead>> {
    if stdin || input == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(input)
        .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", input, e)))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Non-empty, trimmed lines of the input.
pub fn read_lines(reader: Box<dyn BufRead>) -> CliResult<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| CliError::runtime(format!("Failed to read line: {}", e)))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

pub fn load_events(path: &Path) -> anyhow::Result<Vec<CalendarEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events file: {}", path.display()))?;
    debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}
