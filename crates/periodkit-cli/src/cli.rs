use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ISO-week period selection tool
#[derive(Parser, Debug)]
#[command(name = "periodkit", version)]
#[command(about = "ISO-week period selection and comparison presets")]
pub struct Cli {
    /// Business timezone used to determine today's date
    #[arg(long, global = true, default_value = "Europe/Moscow")]
    pub tz: String,

    /// Pin today's date (YYYY-MM-DD) or instant (RFC 3339) instead of reading the system clock
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dates, month and neighbours of an ISO week
    Week(WeekArgs),
    /// Show the dates and member weeks of a calendar month
    Month(MonthArgs),
    /// Show the member weeks of a calendar quarter
    Quarter(QuarterArgs),
    /// Compute a comparison preset relative to today
    Preset(PresetArgs),
    /// Classify metric availability for a period
    Availability(AvailabilityArgs),
    /// Replay a period controller session
    State(StateArgs),
}

impl Commands {
    pub fn output_format(&self) -> &str {
        match self {
            Commands::Week(args) => &args.output_format,
            Commands::Month(args) => &args.output_format,
            Commands::Quarter(args) => &args.output_format,
            Commands::Preset(args) => &args.output_format,
            Commands::Availability(args) => &args.output_format,
            Commands::State(args) => &args.output_format,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct WeekArgs {
    /// ISO week (YYYY-Www), or "current"
    pub week: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct MonthArgs {
    /// Month (YYYY-MM), or "current"
    pub month: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct QuarterArgs {
    /// Calendar year
    pub year: i32,

    /// Quarter: 1-4
    pub quarter: u32,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct PresetArgs {
    /// Preset: mom, qoq, yoy, custom
    pub preset: String,

    /// Render the periods as ISO week ranges instead of dates
    #[arg(long)]
    pub iso: bool,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct AvailabilityArgs {
    /// Metric key (e.g., salesGross, margin, ordersCount)
    #[arg(short, long)]
    pub metric: String,

    /// Period identifier (YYYY-Www or YYYY-MM)
    #[arg(short, long)]
    pub period: String,

    /// Period type: week, month
    #[arg(long = "type", default_value = "week")]
    pub period_type: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct StateArgs {
    /// Last week with a finished report (YYYY-Www)
    #[arg(long)]
    pub last_completed: String,

    /// Initial URL query string (e.g., "type=week&week=2026-W05")
    #[arg(long, default_value = "")]
    pub url: String,

    /// JSON file holding persisted preferences (in-memory when omitted)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Action to apply, repeatable: type=week|month, week=ID, month=ID, refresh
    #[arg(long = "action")]
    pub actions: Vec<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
