use std::process::ExitCode;

use chrono::NaiveDate;
use periodkit_core::calendar::{
    is_current_month, month_end, month_start, next_month, previous_month, weeks_in_month,
};
use periodkit_core::label::format_month_label;
use periodkit_core::preset::{format_week_range, quarter_range, weeks_in_quarter};
use periodkit_core::{Clock, MonthId, WeekId};
use serde::Serialize;

use crate::cli::{MonthArgs, QuarterArgs};
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::parse_month_arg;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthReport {
    month: MonthId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    quarter: u32,
    weeks: Vec<WeekId>,
    week_range: String,
    previous_month: MonthId,
    next_month: MonthId,
    label: String,
    is_current: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuarterReport {
    year: i32,
    quarter: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    weeks: Vec<WeekId>,
    week_range: String,
}

pub fn run_month(args: MonthArgs, clock: &dyn Clock, output_format: OutputFormat) -> CliResult<ExitCode> {
    let month = parse_month_arg(&args.month, clock)?;
    let weeks = weeks_in_month(month);

    let report = MonthReport {
        month,
        start_date: month_start(month),
        end_date: month_end(month),
        quarter: month.quarter(),
        week_range: format_week_range(&weeks),
        weeks,
        previous_month: previous_month(month),
        next_month: next_month(month),
        label: format_month_label(month, clock),
        is_current: is_current_month(month, clock),
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{}: {} to {}", report.month, report.start_date, report.end_date);
            println!("  Label:           {}", report.label);
            println!("  Quarter:         Q{}", report.quarter);
            println!("  Weeks:           {}", report.week_range);
            println!("  Previous month:  {}", report.previous_month);
            println!("  Next month:      {}", report.next_month);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

pub fn run_quarter(args: QuarterArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let range = quarter_range(args.year, args.quarter)?;
    let weeks = weeks_in_quarter(args.year, args.quarter)?;

    let report = QuarterReport {
        year: args.year,
        quarter: args.quarter,
        start_date: range.from,
        end_date: range.to,
        week_range: format_week_range(&weeks),
        weeks,
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "{} Q{}: {} to {}",
                report.year, report.quarter, report.start_date, report.end_date
            );
            println!("  Weeks:           {} ({})", report.week_range, report.weeks.len());
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
