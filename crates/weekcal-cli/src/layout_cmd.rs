use std::path::Path;
use std::process::ExitCode;

use weekcal_core::layout::{LayoutSpan, layout_calendar_event};
use weekcal_core::{CalendarEvent, CalendarType};

use crate::cli::LayoutArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{load_settings, parse_format, parse_time, print_json};

pub fn run_layout(
    args: LayoutArgs,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let settings = load_settings(config, args.tz.as_deref())?;
    let calendar = settings.calendar()?;
    let format = parse_format(&args.format)?;

    let day = parse_time(&args.day, format, "--day")?;
    let start = parse_time(&args.start, format, "--start")?;
    let end = parse_time(&args.end, format, "--end")?;

    let reference = calendar.timestamp_to_date_parts(day)?.ordinal();
    let event = CalendarEvent::new("layout", "", start, end);
    let layout = layout_calendar_event(&event, reference, &calendar)?;

    match output_format {
        OutputFormat::Json => print_json(&layout, true)?,
        OutputFormat::Text => {
            print_span("screen", &layout.screen);
            print_span("pdf", &layout.pdf);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_span(name: &str, span: &LayoutSpan) {
    let style = span.visibility.css();
    if style.is_empty() {
        println!("{}: top={} height={}", name, span.top_css(), span.height_css());
    } else {
        println!(
            "{}: top={} height={} {}",
            name,
            span.top_css(),
            span.height_css(),
            style
        );
    }
}
