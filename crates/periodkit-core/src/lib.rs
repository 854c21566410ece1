//! # periodkit-core
//!
//! ISO-week calendar arithmetic and period selection for weekly/monthly
//! analytics dashboards.
//!
//! Reports are produced per ISO-8601 week. This library converts between
//! week identifiers (`YYYY-Www`), month identifiers (`YYYY-MM`) and
//! calendar dates, builds comparison presets, tells which metrics are not
//! available yet for the open period, and owns the selected period of a
//! dashboard without ever pointing it at a week that has no report.
//!
//! ## Features
//!
//! - **Thursday rule**: a week belongs to the month containing its
//!   Thursday, so every week is in exactly one month.
//! - **Year boundaries**: 52/53-week years, early January in the previous
//!   ISO year, late December in the next one.
//! - **Presets**: MoM/QoQ/YoY/custom as date ranges or week-range strings,
//!   with an explicit flag when a YoY week 53 has no counterpart.
//! - **Availability**: realtime/delayed/pending weekly report per metric.
//! - **Controller**: URL, stored preference and cache invalidation behind
//!   injected ports.
//!
//! ## Example
//!
//! ```rust
//! use periodkit_core::prelude::*;
//!
//! let week: WeekId = "2026-W05".parse().unwrap();
//! assert_eq!(month_from_week(week).to_string(), "2026-01");
//! assert_eq!(previous_week("2026-W01".parse().unwrap()).to_string(), "2025-W52");
//!
//! let range = week_range(week);
//! println!("{} .. {}", range.from, range.to);
//! ```

pub mod availability;
pub mod calendar;
pub mod clock;
pub mod controller;
pub mod error;
pub mod label;
pub mod models;
pub mod ports;
pub mod preset;

// Re-export commonly used types at the crate root
pub use availability::{AvailabilityReport, MetricAvailability, classify, describe};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{ControllerConfig, PeriodController, PeriodState, Ports};
pub use error::{PeriodError, Result};
pub use models::{ComparisonPreset, DateParams, MonthId, Period, PeriodRange, PeriodType, WeekId};
pub use preset::{IsoRangePair, RangePair, calculate_legacy_preset, iso_preset};

/// Prelude module for convenient imports.
///
/// ```
/// use periodkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::availability::{
        AvailabilityReport, MetricAvailability, classify, describe, expected_report_date,
    };
    pub use crate::calendar::*;
    pub use crate::clock::{Clock, FixedClock, SystemClock, parse_tz};
    pub use crate::controller::{ControllerConfig, PeriodController, PeriodState, Ports};
    pub use crate::error::{PeriodError, Result};
    pub use crate::label::{format_month_label, format_week_label};
    pub use crate::models::*;
    pub use crate::ports::*;
    pub use crate::preset::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 29).unwrap())
    }

    fn ports(last_completed: &str, query: &MemoryQueryParams) -> Ports {
        let last_completed: WeekId = last_completed.parse().unwrap();
        Ports {
            clock: Box::new(clock()),
            completed_week: Box::new(move || last_completed),
            preferences: Box::new(MemoryKeyValueStore::new()),
            query: Box::new(query.clone()),
            invalidator: Box::new(RecordingInvalidator::new()),
        }
    }

    #[test]
    fn mount_without_url_selects_last_completed_week() {
        let query = MemoryQueryParams::new();
        let controller = PeriodController::mount(ports("2026-W04", &query), ControllerConfig::default());

        assert_eq!(controller.state().period_type(), PeriodType::Week);
        assert_eq!(controller.state().selected_week().to_string(), "2026-W04");
        assert_eq!(controller.state().selected_month().to_string(), "2026-01");
    }

    #[test]
    fn month_switch_from_incomplete_week() {
        let query = MemoryQueryParams::from_query("week=2026-W05");
        let mut controller =
            PeriodController::mount(ports("2026-W04", &query), ControllerConfig::default());

        controller.set_period_type(PeriodType::Month);
        assert_eq!(controller.state().selected_month().to_string(), "2026-01");
        assert_eq!(query.to_query(), "month=2026-01&type=month");
    }

    #[test]
    fn last_week_of_2025_belongs_to_december() {
        let week: WeekId = "2025-W52".parse().unwrap();
        assert_eq!(month_from_week(week).to_string(), "2025-12");
    }

    #[test]
    fn sales_pending_for_current_week_only() {
        let clock = clock();
        let current = Period::Week(current_week(&clock));
        assert_eq!(
            classify("salesGross", current, &clock),
            MetricAvailability::PendingWeeklyReport
        );
        let past = Period::Week("2026-W03".parse().unwrap());
        assert_eq!(classify("salesGross", past, &clock), MetricAvailability::Realtime);
    }

    #[test]
    fn prelude_exports() {
        let _tz = parse_tz("UTC").unwrap();
        let _preset = ComparisonPreset::Mom;
        let _type = PeriodType::Month;
    }
}
