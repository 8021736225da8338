use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use weekcal_core::{GregorianCalendar, TimestampFormat, ViewKind, resolve_window};

use crate::cli::WindowArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    format_local, load_settings, open_input, parse_format, parse_time, parse_view, read_lines,
};

pub fn run_window(
    args: WindowArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let settings = load_settings(config, args.tz.as_deref())?;
    let calendar = settings.calendar()?;
    let view = parse_view(&args.view)?;
    let format = parse_format(&args.format)?;
    let lookahead = args.lookahead.unwrap_or(settings.lookahead_days);

    let lines = read_lines(open_input(&args.input, args.stdin)?)?;
    for line in lines {
        let result = process_window_line(&line, &calendar, view, format, lookahead)
            .map_err(|e| e.context(format!("Error processing '{}'", line)))?;

        match output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string(&result)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!(
                    "{} -> {} to {}",
                    result.input, result.start_local, result.end_local
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct WindowResult {
    input: String,
    view: ViewKind,
    tz: String,
    start: i64,
    end: i64,
    start_local: String,
    end_local: String,
}

fn process_window_line(
    input: &str,
    calendar: &GregorianCalendar,
    view: ViewKind,
    format: TimestampFormat,
    lookahead: u32,
) -> CliResult<WindowResult> {
    let reference = parse_time(input, format, "timestamp")?;
    let window = resolve_window(reference, view, calendar, lookahead)?;

    Ok(WindowResult {
        input: input.to_string(),
        view,
        tz: calendar.tz().to_string(),
        start: window.start,
        end: window.end,
        start_local: format_local(calendar, window.start)?,
        end_local: format_local(calendar, window.end)?,
    })
}
