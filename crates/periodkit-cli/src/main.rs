use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod availability_cmd;
mod cli;
mod error;
mod file_store;
mod month_cmd;
mod preset_cmd;
mod shared;
mod state_cmd;
mod week_cmd;

use availability_cmd::run_availability;
use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use month_cmd::{run_month, run_quarter};
use preset_cmd::run_preset;
use shared::build_clock;
use state_cmd::run_state;
use week_cmd::run_week;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Parsed CLI args: {:?}", cli);

    let fallback = output_format_hint(cli.command.output_format());
    let output_format = match parse_output_format(cli.command.output_format()) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(cli, output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn run(cli: Cli, output_format: OutputFormat) -> CliResult<ExitCode> {
    let clock = build_clock(&cli.tz, cli.today.as_deref())?;

    match cli.command {
        Commands::Week(args) => run_week(args, &*clock, output_format),
        Commands::Month(args) => run_month(args, &*clock, output_format),
        Commands::Quarter(args) => run_quarter(args, output_format),
        Commands::Preset(args) => run_preset(args, clock.today(), output_format),
        Commands::Availability(args) => run_availability(args, &*clock, output_format),
        Commands::State(args) => run_state(args, clock, output_format),
    }
}
