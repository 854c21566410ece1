use std::process::ExitCode;

use chrono::NaiveDate;
use periodkit_core::availability::expected_report_date;
use periodkit_core::calendar::{
    is_current_week, month_from_week, next_week, previous_week, week_end, week_start,
};
use periodkit_core::label::format_week_label;
use periodkit_core::{Clock, MonthId, WeekId};
use serde::Serialize;

use crate::cli::WeekArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::parse_week_arg;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekReport {
    week: WeekId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    month: MonthId,
    previous_week: WeekId,
    next_week: WeekId,
    label: String,
    is_current: bool,
    expected_report_date: NaiveDate,
}

pub fn run_week(args: WeekArgs, clock: &dyn Clock, output_format: OutputFormat) -> CliResult<ExitCode> {
    let week = parse_week_arg(&args.week, clock)?;
    let report = build_report(week, clock);

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{}: {} to {}", report.week, report.start_date, report.end_date);
            println!("  Label:           {}", report.label);
            println!("  Month:           {}", report.month);
            println!("  Previous week:   {}", report.previous_week);
            println!("  Next week:       {}", report.next_week);
            println!("  Report expected: {}", report.expected_report_date);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn build_report(week: WeekId, clock: &dyn Clock) -> WeekReport {
    WeekReport {
        week,
        start_date: week_start(week),
        end_date: week_end(week),
        month: month_from_week(week),
        previous_week: previous_week(week),
        next_week: next_week(week),
        label: format_week_label(week, clock),
        is_current: is_current_week(week, clock),
        expected_report_date: expected_report_date(week),
    }
}
