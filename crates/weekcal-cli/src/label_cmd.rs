use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use weekcal_core::{GregorianCalendar, TimestampFormat, format_period_label, week_start};

use crate::cli::LabelArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{format_local, load_settings, open_input, parse_format, parse_time, read_lines};

pub fn run_label(
    args: LabelArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let settings = load_settings(config, args.tz.as_deref())?;
    let calendar = settings.calendar()?;
    let format = parse_format(&args.format)?;

    let lines = read_lines(open_input(&args.input, args.stdin)?)?;
    for line in lines {
        let result = process_label_line(&line, &calendar, format)
            .map_err(|e| e.context(format!("Error processing '{}'", line)))?;

        match output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string(&result)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => println!("{}: {}", result.start_local, result.label),
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct LabelResult {
    input: String,
    start: i64,
    start_local: String,
    label: String,
}

fn process_label_line(
    input: &str,
    calendar: &GregorianCalendar,
    format: TimestampFormat,
) -> CliResult<LabelResult> {
    let reference = parse_time(input, format, "timestamp")?;
    let start = week_start(reference, 0, calendar)?;

    Ok(LabelResult {
        input: input.to_string(),
        start,
        start_local: format_local(calendar, start)?,
        label: format_period_label(start, calendar)?,
    })
}
