use std::process::ExitCode;

use chrono::NaiveDate;
use periodkit_core::{ComparisonPreset, IsoRangePair, RangePair, calculate_legacy_preset, iso_preset};
use serde::Serialize;
use tracing::warn;

use crate::cli::PresetArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::parse_preset;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Periods {
    Dates(RangePair),
    Weeks(IsoRangePair),
}

#[derive(Debug, Serialize)]
struct PresetReport {
    preset: ComparisonPreset,
    today: NaiveDate,
    #[serde(flatten)]
    periods: Periods,
}

pub fn run_preset(args: PresetArgs, today: NaiveDate, output_format: OutputFormat) -> CliResult<ExitCode> {
    let preset = parse_preset(&args.preset)?;

    let periods = if args.iso {
        let pair = iso_preset(preset, today)?;
        if pair.week_mismatch {
            warn!(
                baseline = %pair.period1,
                compared = %pair.period2,
                "previous ISO year has no matching week, comparing against its last week"
            );
        }
        Periods::Weeks(pair)
    } else {
        Periods::Dates(calculate_legacy_preset(preset, today)?)
    };

    let report = PresetReport {
        preset,
        today,
        periods,
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{} relative to {}", report.preset, report.today);
            match &report.periods {
                Periods::Dates(pair) => {
                    println!("  Period 1: {} to {}", pair.period1.from, pair.period1.to);
                    println!("  Period 2: {} to {}", pair.period2.from, pair.period2.to);
                }
                Periods::Weeks(pair) => {
                    println!("  Period 1: {}", pair.period1);
                    println!("  Period 2: {}", pair.period2);
                    if pair.week_mismatch {
                        println!("  Note: week number has no counterpart in the previous year");
                    }
                }
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
