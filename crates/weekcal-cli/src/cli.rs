use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Week calendar windows, event buckets and screen/PDF layout
#[derive(Parser, Debug)]
#[command(name = "weekcal", version)]
#[command(about = "Week calendar windows, event buckets and screen/PDF layout")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// TOML config file (timezone, lookahead_days, max_upcoming_events, weekend_mask)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the time window of a view for each input timestamp
    Window(WindowArgs),
    /// Label the week containing each input timestamp
    Label(LabelArgs),
    /// Assemble the full week view with bucketed, laid out events
    Week(WeekArgs),
    /// List the events falling in a view's window
    List(ListArgs),
    /// Compute screen and PDF placement of a single event on one day
    Layout(LayoutArgs),
}

#[derive(clap::Args, Debug)]
pub struct WindowArgs {
    /// IANA timezone (overrides the config file)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// View kind: day, week, month, upcoming
    #[arg(short, long, default_value = "week")]
    pub view: String,

    /// Days covered by the upcoming view (overrides the config file)
    #[arg(long)]
    pub lookahead: Option<u32>,

    /// Input format: epoch_s, epoch_ms, rfc3339, auto
    #[arg(short = 'f', long, default_value = "auto")]
    pub format: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Read from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(clap::Args, Debug)]
pub struct LabelArgs {
    /// IANA timezone (overrides the config file)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// Input format: epoch_s, epoch_ms, rfc3339, auto
    #[arg(short = 'f', long, default_value = "auto")]
    pub format: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Read from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(clap::Args, Debug)]
pub struct WeekArgs {
    /// IANA timezone (overrides the config file)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// Instant whose week is rendered
    #[arg(long)]
    pub time: String,

    /// Instant treated as "now" for the today highlight (defaults to the system clock)
    #[arg(long)]
    pub now: Option<String>,

    /// JSON file holding an array of events
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Weekend bitmask (overrides the config file)
    #[arg(long)]
    pub weekend_mask: Option<u32>,

    /// Timestamp format of --time and --now: epoch_s, epoch_ms, rfc3339, auto
    #[arg(short = 'f', long, default_value = "auto")]
    pub format: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// IANA timezone (overrides the config file)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// View kind: day, week, month, upcoming
    #[arg(short, long, default_value = "upcoming")]
    pub view: String,

    /// Reference instant of the view
    #[arg(long)]
    pub time: String,

    /// JSON file holding an array of events
    #[arg(long)]
    pub events: PathBuf,

    /// Days covered by the upcoming view (overrides the config file)
    #[arg(long)]
    pub lookahead: Option<u32>,

    /// Timestamp format of --time: epoch_s, epoch_ms, rfc3339, auto
    #[arg(short = 'f', long, default_value = "auto")]
    pub format: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct LayoutArgs {
    /// IANA timezone (overrides the config file)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// Any instant on the day column the event is placed on
    #[arg(long)]
    pub day: String,

    /// Event start
    #[arg(long)]
    pub start: String,

    /// Event end
    #[arg(long)]
    pub end: String,

    /// Timestamp format: epoch_s, epoch_ms, rfc3339, auto
    #[arg(short = 'f', long, default_value = "auto")]
    pub format: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
