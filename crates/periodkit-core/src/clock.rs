//! Clock port and business-timezone handling.
//!
//! "Today" on the dashboard is the calendar date in the business timezone,
//! not in UTC: a week rolls over at local midnight on Monday. Everything
//! else in the crate takes dates, so the clock is the only place where a
//! timezone is involved.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{PeriodError, Result};

/// Default business timezone for the dashboard.
pub const DEFAULT_TZ: Tz = chrono_tz::Europe::Moscow;

/// Source of the current instant.
pub trait Clock {
    /// Current instant, used for refresh timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the business timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time, with "today" resolved in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        SystemClock { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new(DEFAULT_TZ)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        local_date(Utc::now(), self.tz)
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// Pin the clock to `now`, deriving the date in `tz`.
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        FixedClock {
            now,
            today: local_date(now, tz),
        }
    }

    /// Pin the clock to noon UTC on `today`.
    pub fn on(today: NaiveDate) -> Self {
        FixedClock {
            now: (today.and_time(NaiveTime::default()) + Duration::hours(12)).and_utc(),
            today,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// ```
/// use periodkit_core::clock::parse_tz;
///
/// let tz = parse_tz("Europe/Moscow").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Moscow");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| PeriodError::InvalidFormat {
        input: name.to_string(),
        expected: "an IANA timezone name",
    })
}

/// Calendar date of `instant` in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
