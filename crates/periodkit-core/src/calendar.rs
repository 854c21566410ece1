//! ISO-week calendar arithmetic.
//!
//! Pure conversions between week identifiers, month identifiers and
//! calendar dates. A week belongs to exactly one month: the month that
//! contains its Thursday. This is the same rule ISO-8601 uses to assign
//! weeks to years, and every week-to-month mapping in the crate goes
//! through [`month_from_week`].

use chrono::{Datelike, Duration, NaiveDate};

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{MonthId, Period, PeriodRange, WeekId};

/// Monday of the week named by `week_id`.
///
/// Fails with `InvalidFormat` for strings that are not `YYYY-Www` and with
/// `InvalidWeekNumber` for weeks the ISO year does not have.
///
/// ```
/// use periodkit_core::calendar::parse_week;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_week("2026-W01").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
/// );
/// assert!(parse_week("2025-W53").is_err());
/// ```
pub fn parse_week(week_id: &str) -> Result<NaiveDate> {
    week_id.parse::<WeekId>().map(|week| week.monday())
}

/// First day of the month named by `month_id`.
pub fn parse_month(month_id: &str) -> Result<NaiveDate> {
    month_id.parse::<MonthId>().map(|month| month.first_day())
}

/// Monday of `week`.
pub fn week_start(week: WeekId) -> NaiveDate {
    week.monday()
}

/// Sunday of `week`, the last day included in it.
pub fn week_end(week: WeekId) -> NaiveDate {
    week.sunday()
}

pub fn month_start(month: MonthId) -> NaiveDate {
    month.first_day()
}

/// Last day of `month`, included in it.
pub fn month_end(month: MonthId) -> NaiveDate {
    month.last_day()
}

/// Monday..Sunday of `week`.
pub fn week_range(week: WeekId) -> PeriodRange {
    PeriodRange {
        from: week_start(week),
        to: week_end(week),
    }
}

/// First..last day of `month`.
pub fn month_range(month: MonthId) -> PeriodRange {
    PeriodRange {
        from: month_start(month),
        to: month_end(month),
    }
}

pub fn period_range(period: Period) -> PeriodRange {
    match period {
        Period::Week(week) => week_range(week),
        Period::Month(month) => month_range(month),
    }
}

/// The ISO week containing today's date.
pub fn current_week(clock: &dyn Clock) -> WeekId {
    WeekId::containing(clock.today())
}

/// The calendar month containing today's date.
pub fn current_month(clock: &dyn Clock) -> MonthId {
    MonthId::containing(clock.today())
}

pub fn is_current_week(week: WeekId, clock: &dyn Clock) -> bool {
    week == current_week(clock)
}

pub fn is_current_month(month: MonthId, clock: &dyn Clock) -> bool {
    month == current_month(clock)
}

/// Whether `period` is still open (today falls inside it).
pub fn is_current_period(period: Period, clock: &dyn Clock) -> bool {
    period_range(period).contains(clock.today())
}

/// The week before `week`. Week 1 rolls back to week 52 or 53 of the
/// previous ISO year.
pub fn previous_week(week: WeekId) -> WeekId {
    week.offset(-1)
}

pub fn next_week(week: WeekId) -> WeekId {
    week.offset(1)
}

/// The month before `month`. January rolls back to the previous December.
pub fn previous_month(month: MonthId) -> MonthId {
    month.offset(-1)
}

pub fn next_month(month: MonthId) -> MonthId {
    month.offset(1)
}

/// The month a week belongs to: the month containing its Thursday.
///
/// ```
/// use periodkit_core::calendar::month_from_week;
///
/// // 2026-W05 runs Mon 26 Jan - Sun 1 Feb; Thursday is 29 Jan.
/// let week = "2026-W05".parse().unwrap();
/// assert_eq!(month_from_week(week).to_string(), "2026-01");
/// ```
pub fn month_from_week(week: WeekId) -> MonthId {
    MonthId::containing(week.thursday())
}

/// All weeks whose Thursday falls inside `month`, ascending.
///
/// Walks week by week from the week containing the 1st up to the month's
/// last day, keeping only weeks assigned to `month` by the Thursday rule.
pub fn weeks_in_month(month: MonthId) -> Vec<WeekId> {
    let last_day = month_end(month);
    let mut week = WeekId::containing(month_start(month));
    let mut weeks = Vec::with_capacity(5);

    while week.monday() <= last_day {
        if month_from_week(week) == month {
            weeks.push(week);
        }
        week = next_week(week);
    }

    weeks
}

/// Number of ISO weeks in `year`: 52, or 53 for long years.
pub fn weeks_in_year(year: i32) -> u32 {
    // 28 December always lies in the last ISO week of its year.
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .unwrap_or(52)
}

/// Every ISO week of `year` in order.
pub fn weeks_in_iso_year(year: i32) -> Vec<WeekId> {
    (1..=weeks_in_year(year))
        .filter_map(|week| WeekId::new(year, week).ok())
        .collect()
}

/// The first day strictly after `date` that falls on `weekday`.
pub fn next_weekday_after(date: NaiveDate, weekday: chrono::Weekday) -> NaiveDate {
    let current = date.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    date + Duration::days(ahead)
}
