//! Error types for periodkit-core.
//!
//! Calendar and preset functions are strict: malformed identifiers are
//! reported to the caller instead of being coerced. The period controller
//! is the only layer that swallows these errors.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for period operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The string does not match the expected identifier pattern.
    #[error("Invalid format: '{input}'. Expected {expected}")]
    InvalidFormat {
        input: String,
        expected: &'static str,
    },

    /// Well-formed week identifier whose week does not exist in that ISO year.
    #[error("Invalid week number: {year}-W{week:02} does not exist")]
    InvalidWeekNumber { year: i32, week: u32 },

    /// Well-formed month identifier with a month outside 1-12.
    #[error("Invalid month number: {year}-{month:02}")]
    InvalidMonthNumber { year: i32, month: u32 },

    /// Quarter outside 1-4.
    #[error("Invalid quarter: {0}. Expected 1-4")]
    InvalidQuarter(u32),

    /// Date range whose start lies after its end.
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Unknown period type name.
    #[error("Invalid period type: '{0}'. Expected 'week' or 'month'")]
    InvalidPeriodType(String),
}

/// Result type alias for period operations.
pub type Result<T> = std::result::Result<T, PeriodError>;

impl PeriodError {
    /// Stable snake_case name of the variant, for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            PeriodError::InvalidFormat { .. } => "invalid_format",
            PeriodError::InvalidWeekNumber { .. } => "invalid_week_number",
            PeriodError::InvalidMonthNumber { .. } => "invalid_month_number",
            PeriodError::InvalidQuarter(_) => "invalid_quarter",
            PeriodError::InvalidRange { .. } => "invalid_range",
            PeriodError::InvalidPeriodType(_) => "invalid_period_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthId, WeekId};

    #[test]
    fn kind_names_the_failure() {
        assert_eq!("2026-W5".parse::<WeekId>().unwrap_err().kind(), "invalid_format");
        assert_eq!("2025-W53".parse::<WeekId>().unwrap_err().kind(), "invalid_week_number");
        assert_eq!("2026-13".parse::<MonthId>().unwrap_err().kind(), "invalid_month_number");
        assert_eq!(PeriodError::InvalidQuarter(5).kind(), "invalid_quarter");
    }

    #[test]
    fn messages_carry_the_input() {
        let err = "2025-W53".parse::<WeekId>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid week number: 2025-W53 does not exist");
    }
}
