use std::process::ExitCode;

use periodkit_core::{Clock, Period, describe};

use crate::cli::AvailabilityArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::parse_period_type;

pub fn run_availability(
    args: AvailabilityArgs,
    clock: &dyn Clock,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let period_type = parse_period_type(&args.period_type)?;
    let period = Period::parse(period_type, &args.period).map_err(|e| {
        CliError::period(format!("Invalid {} '{}'", period_type, args.period), e)
    })?;

    let report = describe(&args.metric, period, clock);

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{} for {}: {}", report.metric, report.period, report.availability);
            if let Some(date) = report.expected_report_date {
                println!("  Report expected: {}", date);
            }
            if let Some(note) = &report.note {
                println!("  {}", note);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
