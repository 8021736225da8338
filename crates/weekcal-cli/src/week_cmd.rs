use std::path::Path;
use std::process::ExitCode;

use weekcal_core::layout::LayoutSpan;
use weekcal_core::{
    CalendarType, GregorianCalendar, InstanceCounter, ViewKind, WeekView, WeekViewRequest,
    assemble_week_view, resolve_window, select_events,
};

use crate::cli::WeekArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{load_events, load_settings, parse_format, parse_time, print_json};

pub fn run_week(
    args: WeekArgs,
    config: Option<&Path>,
    counter: &InstanceCounter,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let settings = load_settings(config, args.tz.as_deref())?;
    let calendar = settings.calendar()?;
    let format = parse_format(&args.format)?;

    let reference = parse_time(&args.time, format, "--time")?;
    let now = match &args.now {
        Some(now) => parse_time(now, format, "--now")?,
        None => chrono::Utc::now().timestamp(),
    };

    let events = match &args.events {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };
    let window = resolve_window(reference, ViewKind::Week, &calendar, settings.lookahead_days)?;
    let events = select_events(&events, window, None);

    let request = WeekViewRequest {
        reference,
        now,
        weekend_mask: args.weekend_mask.unwrap_or(settings.weekend_mask),
    };
    let view = assemble_week_view(&request, &events, &calendar, &calendar, counter)?;

    match output_format {
        OutputFormat::Json => print_json(&view, true)?,
        OutputFormat::Text => print_week_text(&view, &calendar),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_week_text(view: &WeekView, calendar: &GregorianCalendar) {
    println!(
        "{} (calendar {})",
        view.period_name, view.calendar_instance_id
    );
    println!(
        "  previous: {}  next: {}",
        view.previous.label, view.next.label
    );

    for day in &view.week.days {
        let mut marks = String::new();
        if day.is_today {
            marks.push_str(" [today]");
        }
        if day.is_weekend {
            marks.push_str(" [weekend]");
        }
        println!(
            "{} {:04}-{:02}-{:02}{}",
            calendar.weekday_name(day.date.weekday).short_name,
            day.date.year,
            day.date.month,
            day.date.day,
            marks
        );

        for placed in &day.events {
            println!(
                "  {} {}: screen {}, pdf {}",
                placed.event.id,
                placed.event.name,
                describe_span(&placed.layout.screen),
                describe_span(&placed.layout.pdf)
            );
        }
    }
}

fn describe_span(span: &LayoutSpan) -> String {
    let hidden = if span.is_hidden() { " hidden" } else { "" };
    format!("top {} height {}{}", span.top_css(), span.height_css(), hidden)
}
