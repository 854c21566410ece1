use chrono::{DateTime, NaiveDate, Utc};
use periodkit_core::calendar::{current_month, current_week};
use periodkit_core::clock::parse_tz;
use periodkit_core::{Clock, ComparisonPreset, FixedClock, MonthId, PeriodType, SystemClock, WeekId};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Keyword accepted in place of a week or month identifier.
const CURRENT: &str = "current";

/// Clock for this invocation: pinned with `--today`, otherwise the system
/// clock in the business timezone.
///
/// `--today` takes a date (pinned to noon UTC) or an RFC 3339 instant,
/// whose date is resolved in the business timezone.
pub fn build_clock(tz: &str, today: Option<&str>) -> CliResult<Box<dyn Clock>> {
    let tz = parse_tz(tz).map_err(|e| CliError::period(format!("Invalid timezone '{}'", tz), e))?;

    let Some(raw) = today else {
        return Ok(Box::new(SystemClock::new(tz)));
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        let clock = FixedClock::at(instant.with_timezone(&Utc), tz);
        debug!(%instant, today = %clock.today(), "clock pinned to instant");
        return Ok(Box::new(clock));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        CliError::input(format!(
            "Invalid --today '{}': {}. Expected YYYY-MM-DD or an RFC 3339 timestamp",
            raw, e
        ))
    })?;
    debug!(%date, "clock pinned");
    Ok(Box::new(FixedClock::on(date)))
}

pub fn parse_week_arg(s: &str, clock: &dyn Clock) -> CliResult<WeekId> {
    if s.eq_ignore_ascii_case(CURRENT) {
        return Ok(current_week(clock));
    }
    s.parse()
        .map_err(|e| CliError::period(format!("Invalid week '{}'", s), e))
}

pub fn parse_month_arg(s: &str, clock: &dyn Clock) -> CliResult<MonthId> {
    if s.eq_ignore_ascii_case(CURRENT) {
        return Ok(current_month(clock));
    }
    s.parse()
        .map_err(|e| CliError::period(format!("Invalid month '{}'", s), e))
}

pub fn parse_period_type(s: &str) -> CliResult<PeriodType> {
    s.parse()
        .map_err(|e| CliError::period(format!("Invalid type '{}'", s), e))
}

pub fn parse_preset(s: &str) -> CliResult<ComparisonPreset> {
    s.parse()
        .map_err(|e| CliError::period(format!("Invalid preset '{}'", s), e))
}
