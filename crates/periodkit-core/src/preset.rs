//! Comparison presets.
//!
//! A preset yields two periods, `period1` (the baseline) and `period2`
//! (the period being looked at). They come in two encodings:
//! - date ranges, for endpoints that filter by calendar dates
//! - week-range strings such as `"2026-W01—2026-W05"`, for endpoints that
//!   only accept whole ISO weeks
//!
//! Every function takes "today" explicitly.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::{month_range, previous_month, weeks_in_month, weeks_in_year};
use crate::error::{PeriodError, Result};
use crate::models::{ComparisonPreset, MonthId, PeriodRange, WeekId};

/// Separator between the first and last week of a week range.
pub const WEEK_RANGE_SEPARATOR: char = '—';

/// Length of each window of the default custom comparison.
const CUSTOM_WINDOW_DAYS: i64 = 30;

/// Baseline and compared period as date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangePair {
    pub period1: PeriodRange,
    pub period2: PeriodRange,
}

/// Baseline and compared period as week-range strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsoRangePair {
    pub period1: String,
    pub period2: String,
    /// Set when a YoY comparison targets week 53 and the previous ISO year
    /// has only 52 weeks. `period1` then holds that year's last week.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub week_mismatch: bool,
}

/// The three month numbers of `quarter`.
pub fn quarter_months(quarter: u32) -> Result<[u32; 3]> {
    if !(1..=4).contains(&quarter) {
        return Err(PeriodError::InvalidQuarter(quarter));
    }
    let first = (quarter - 1) * 3 + 1;
    Ok([first, first + 1, first + 2])
}

/// First day of the first month to last day of the third month.
pub fn quarter_range(year: i32, quarter: u32) -> Result<PeriodRange> {
    let [first, _, last] = quarter_months(quarter)?;
    let from = MonthId::new(year, first)?.first_day();
    let to = MonthId::new(year, last)?.last_day();
    PeriodRange::new(from, to)
}

/// Date-range pair for `preset`, relative to `today`.
///
/// - `Mom`: previous calendar month vs current calendar month
/// - `Qoq`: previous calendar quarter vs current calendar quarter
/// - `Yoy`: current calendar month one year back vs current month
/// - `Custom`: the 30 days before the trailing 30 days vs the trailing
///   30 days ending today, as a starting point for manual editing
pub fn calculate_legacy_preset(preset: ComparisonPreset, today: NaiveDate) -> Result<RangePair> {
    let current = MonthId::containing(today);

    let pair = match preset {
        ComparisonPreset::Mom => RangePair {
            period1: month_range(previous_month(current)),
            period2: month_range(current),
        },
        ComparisonPreset::Qoq => {
            let (year, quarter) = (current.year(), current.quarter());
            let (prev_year, prev_quarter) = previous_quarter(year, quarter);
            RangePair {
                period1: quarter_range(prev_year, prev_quarter)?,
                period2: quarter_range(year, quarter)?,
            }
        }
        ComparisonPreset::Yoy => RangePair {
            period1: month_range(current.offset(-12)),
            period2: month_range(current),
        },
        ComparisonPreset::Custom => {
            let period2_from = today - Duration::days(CUSTOM_WINDOW_DAYS - 1);
            let period1_to = period2_from - Duration::days(1);
            let period1_from = period1_to - Duration::days(CUSTOM_WINDOW_DAYS - 1);
            RangePair {
                period1: PeriodRange::new(period1_from, period1_to)?,
                period2: PeriodRange::new(period2_from, today)?,
            }
        }
    };

    Ok(pair)
}

fn previous_quarter(year: i32, quarter: u32) -> (i32, u32) {
    if quarter == 1 {
        (year - 1, 4)
    } else {
        (year, quarter - 1)
    }
}

/// Weeks of the quarter's three months, ascending and without duplicates.
pub fn weeks_in_quarter(year: i32, quarter: u32) -> Result<Vec<WeekId>> {
    let mut weeks = Vec::with_capacity(14);
    for month in quarter_months(quarter)? {
        weeks.extend(weeks_in_month(MonthId::new(year, month)?));
    }
    weeks.sort();
    weeks.dedup();
    Ok(weeks)
}

/// `"first—last"`, or the single week when both ends coincide. An empty
/// list renders as an empty string.
pub fn format_week_range(weeks: &[WeekId]) -> String {
    match (weeks.first(), weeks.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first}{WEEK_RANGE_SEPARATOR}{last}"),
        _ => String::new(),
    }
}

/// Week-range string of a calendar month.
///
/// ```
/// use periodkit_core::preset::month_to_iso_week_range;
///
/// assert_eq!(month_to_iso_week_range(2026, 2).unwrap(), "2026-W06—2026-W09");
/// ```
pub fn month_to_iso_week_range(year: i32, month: u32) -> Result<String> {
    let month = MonthId::new(year, month)?;
    Ok(format_week_range(&weeks_in_month(month)))
}

/// Week-range string of a calendar quarter.
pub fn quarter_to_iso_week_range(year: i32, quarter: u32) -> Result<String> {
    Ok(format_week_range(&weeks_in_quarter(year, quarter)?))
}

/// Week range enclosing an arbitrary date range: from the week containing
/// `range.from` to the week containing `range.to`.
pub fn date_range_to_iso_week_range(range: PeriodRange) -> String {
    format_week_range(&[WeekId::containing(range.from), WeekId::containing(range.to)])
}

/// The week with the same number one ISO year earlier.
///
/// Returns the week and whether the number had to be adjusted: when
/// `week` is week 53 and the previous year has 52 weeks, the result is
/// the previous year's last week and the flag is `true`.
pub fn same_week_previous_year(week: WeekId) -> (WeekId, bool) {
    let previous_year_weeks = weeks_in_year(week.year() - 1);
    if week.week() <= previous_year_weeks {
        (week.offset(-(previous_year_weeks as i64)), false)
    } else {
        // Stepping back by the week number lands on the previous year's last week.
        (week.offset(-(week.week() as i64)), true)
    }
}

/// Week-range pair for `preset`, relative to `today`.
///
/// - `Mom`: previous vs current calendar month, as week ranges
/// - `Qoq`: previous vs current calendar quarter, as week ranges
/// - `Yoy`: the same ISO week number one year back vs the current week;
///   `week_mismatch` is set when that week number does not exist
/// - `Custom`: the default custom date window converted to week ranges
pub fn iso_preset(preset: ComparisonPreset, today: NaiveDate) -> Result<IsoRangePair> {
    let current_month = MonthId::containing(today);

    let pair = match preset {
        ComparisonPreset::Mom => IsoRangePair {
            period1: format_week_range(&weeks_in_month(previous_month(current_month))),
            period2: format_week_range(&weeks_in_month(current_month)),
            week_mismatch: false,
        },
        ComparisonPreset::Qoq => {
            let (year, quarter) = (current_month.year(), current_month.quarter());
            let (prev_year, prev_quarter) = previous_quarter(year, quarter);
            IsoRangePair {
                period1: quarter_to_iso_week_range(prev_year, prev_quarter)?,
                period2: quarter_to_iso_week_range(year, quarter)?,
                week_mismatch: false,
            }
        }
        ComparisonPreset::Yoy => {
            let current = WeekId::containing(today);
            let (baseline, week_mismatch) = same_week_previous_year(current);
            IsoRangePair {
                period1: baseline.to_string(),
                period2: current.to_string(),
                week_mismatch,
            }
        }
        ComparisonPreset::Custom => {
            let ranges = calculate_legacy_preset(ComparisonPreset::Custom, today)?;
            IsoRangePair {
                period1: date_range_to_iso_week_range(ranges.period1),
                period2: date_range_to_iso_week_range(ranges.period2),
                week_mismatch: false,
            }
        }
    };

    Ok(pair)
}
