use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use weekcal_core::{CalendarEvent, ViewKind, resolve_window, select_events};

use crate::cli::ListArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    format_local, load_events, load_settings, parse_format, parse_time, parse_view, print_json,
};

pub fn run_list(
    args: ListArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let settings = load_settings(config, args.tz.as_deref())?;
    let calendar = settings.calendar()?;
    let view = parse_view(&args.view)?;
    let format = parse_format(&args.format)?;
    let reference = parse_time(&args.time, format, "--time")?;

    let lookahead = args.lookahead.unwrap_or(settings.lookahead_days);
    let window = resolve_window(reference, view, &calendar, lookahead)?;
    let limit = (view == ViewKind::Upcoming).then_some(settings.max_upcoming_events);

    let events = select_events(&load_events(&args.events)?, window, limit);

    match output_format {
        OutputFormat::Json => print_json(
            &ListResult {
                view,
                start: window.start,
                end: window.end,
                events,
            },
            true,
        )?,
        OutputFormat::Text => {
            for event in &events {
                let (start, end) = event.times()?;
                println!(
                    "{}\t{}\t{}\t{}",
                    event.id,
                    format_local(&calendar, start)?,
                    format_local(&calendar, end)?,
                    event.name
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ListResult {
    view: ViewKind,
    start: i64,
    end: i64,
    events: Vec<CalendarEvent>,
}
