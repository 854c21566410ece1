//! Core data types for periodkit.
//!
//! This module defines the identifiers and ranges shared by every engine:
//! - [`WeekId`] - ISO-8601 week, canonical form `YYYY-Www`
//! - [`MonthId`] - calendar month, canonical form `YYYY-MM`
//! - [`PeriodType`] - which identifier is authoritative (week/month)
//! - [`Period`] - a week or a month
//! - [`PeriodRange`] - inclusive pair of calendar dates
//! - [`DateParams`] - `{startDate, endDate}` handed to data-fetching code
//! - [`ComparisonPreset`] - MoM/QoQ/YoY/custom comparison selector

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, Result};

/// An ISO-8601 week.
///
/// Stored as the Monday that opens the week, so every value is a valid
/// week by construction. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekId {
    monday: NaiveDate,
}

impl WeekId {
    /// Build a week from an ISO week-numbering year and week number.
    ///
    /// Fails with [`PeriodError::InvalidWeekNumber`] when the week does not
    /// exist in that year (week 0, or week 53 of a 52-week year).
    pub fn new(year: i32, week: u32) -> Result<Self> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .map(|monday| WeekId { monday })
            .ok_or(PeriodError::InvalidWeekNumber { year, week })
    }

    /// The ISO week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let days_from_monday = date.weekday().num_days_from_monday() as i64;
        WeekId {
            monday: date - Duration::days(days_from_monday),
        }
    }

    /// ISO week-numbering year (may differ from the calendar year of the Monday).
    pub fn year(&self) -> i32 {
        self.monday.iso_week().year()
    }

    /// Week number, 1-53.
    pub fn week(&self) -> u32 {
        self.monday.iso_week().week()
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// The Thursday of this week. Its calendar month and year decide
    /// which month the week belongs to.
    pub fn thursday(&self) -> NaiveDate {
        self.monday + Duration::days(3)
    }

    pub fn sunday(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    /// Shift by a whole number of weeks, crossing ISO years as needed.
    pub fn offset(&self, weeks: i64) -> Self {
        WeekId {
            monday: self.monday + Duration::weeks(weeks),
        }
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year(), self.week())
    }
}

impl FromStr for WeekId {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PeriodError::InvalidFormat {
            input: s.to_string(),
            expected: "YYYY-Www",
        };

        let bytes = s.as_bytes();
        if bytes.len() != 8 || bytes[4] != b'-' || bytes[5] != b'W' {
            return Err(invalid());
        }

        let year = parse_digits(&s[0..4]).ok_or_else(invalid)?;
        let week = parse_digits(&s[6..8]).ok_or_else(invalid)?;

        WeekId::new(year as i32, week)
    }
}

impl TryFrom<String> for WeekId {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WeekId> for String {
    fn from(value: WeekId) -> Self {
        value.to_string()
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthId {
    first: NaiveDate,
}

impl MonthId {
    /// Build a month, failing with [`PeriodError::InvalidMonthNumber`]
    /// when `month` is outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| MonthId { first })
            .ok_or(PeriodError::InvalidMonthNumber { year, month })
    }

    /// The calendar month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        MonthId {
            first: date - Duration::days(date.day0() as i64),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Calendar quarter, 1-4.
    pub fn quarter(&self) -> u32 {
        (self.month() - 1) / 3 + 1
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Months::new(1) - Duration::days(1)
    }

    /// Shift by a whole number of months, crossing years as needed.
    pub fn offset(&self, months: i32) -> Self {
        let first = if months >= 0 {
            self.first + Months::new(months.unsigned_abs())
        } else {
            self.first - Months::new(months.unsigned_abs())
        };
        MonthId { first }
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthId {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PeriodError::InvalidFormat {
            input: s.to_string(),
            expected: "YYYY-MM",
        };

        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }

        let year = parse_digits(&s[0..4]).ok_or_else(invalid)?;
        let month = parse_digits(&s[5..7]).ok_or_else(invalid)?;

        MonthId::new(year as i32, month)
    }
}

impl TryFrom<String> for MonthId {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthId> for String {
    fn from(value: MonthId) -> Self {
        value.to_string()
    }
}

/// Parse a fixed-width run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Which identifier drives the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Week,
    Month,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Week => "week",
            PeriodType::Month => "month",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            _ => Err(PeriodError::InvalidPeriodType(s.to_string())),
        }
    }
}

/// A week or a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Period {
    Week(WeekId),
    Month(MonthId),
}

impl Period {
    /// Parse `s` as the identifier kind named by `period_type`.
    pub fn parse(period_type: PeriodType, s: &str) -> Result<Self> {
        match period_type {
            PeriodType::Week => s.parse().map(Period::Week),
            PeriodType::Month => s.parse().map(Period::Month),
        }
    }

    pub fn period_type(&self) -> PeriodType {
        match self {
            Period::Week(_) => PeriodType::Week,
            Period::Month(_) => PeriodType::Month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week(week) => week.fmt(f),
            Period::Month(month) => month.fmt(f),
        }
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl PeriodRange {
    /// Build a range, rejecting `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(PeriodError::InvalidRange { from, to });
        }
        Ok(PeriodRange { from, to })
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// The `{startDate, endDate}` pair consumed by REST query builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<PeriodRange> for DateParams {
    fn from(range: PeriodRange) -> Self {
        DateParams {
            start_date: range.from,
            end_date: range.to,
        }
    }
}

/// Named comparison preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonPreset {
    /// Previous month vs current month.
    Mom,
    /// Previous quarter vs current quarter.
    Qoq,
    /// Same period one year back vs current.
    Yoy,
    /// User-edited ranges; only a starting window is derived.
    Custom,
}

impl fmt::Display for ComparisonPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonPreset::Mom => write!(f, "mom"),
            ComparisonPreset::Qoq => write!(f, "qoq"),
            ComparisonPreset::Yoy => write!(f, "yoy"),
            ComparisonPreset::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ComparisonPreset {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mom" => Ok(ComparisonPreset::Mom),
            "qoq" => Ok(ComparisonPreset::Qoq),
            "yoy" => Ok(ComparisonPreset::Yoy),
            "custom" => Ok(ComparisonPreset::Custom),
            _ => Err(PeriodError::InvalidFormat {
                input: s.to_string(),
                expected: "one of mom, qoq, yoy, custom",
            }),
        }
    }
}
