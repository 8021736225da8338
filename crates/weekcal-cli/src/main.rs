use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weekcal_core::InstanceCounter;

mod cli;
mod error;
mod label_cmd;
mod layout_cmd;
mod list_cmd;
mod shared;
mod week_cmd;
mod window_cmd;

use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use label_cmd::run_label;
use layout_cmd::run_layout;
use list_cmd::run_list;
use week_cmd::run_week;
use window_cmd::run_window;

/// Calendar instance ids handed out by this process.
static INSTANCES: InstanceCounter = InstanceCounter::new();

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Window(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_window(args, config, format))
        }
        Commands::Label(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_label(args, config, format))
        }
        Commands::Week(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_week(args, config, &INSTANCES, format))
        }
        Commands::List(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_list(args, config, format))
        }
        Commands::Layout(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_layout(args, config, format))
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the output format, run the command and render any error in that
/// format.
fn dispatch<F>(requested: &str, run: F) -> ExitCode
where
    F: FnOnce(OutputFormat) -> CliResult<ExitCode>,
{
    let fallback = output_format_hint(requested);
    let output_format = match parse_output_format(requested) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}
