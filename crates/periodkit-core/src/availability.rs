//! Metric availability for open periods.
//!
//! Historical periods are settled, so every metric is available for them.
//! For the current period, availability depends on where the metric comes
//! from: operational counters update continuously, marketplace feeds lag a
//! day or two, and cost metrics only exist after the weekly report closes.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::calendar::{is_current_period, month_end, next_weekday_after, week_end};
use crate::clock::Clock;
use crate::models::{MonthId, Period, WeekId};

/// Weekday on which weekly reports are expected to be published.
pub const REPORT_WEEKDAY: Weekday = Weekday::Tue;

/// Availability of one metric for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricAvailability {
    /// Data is complete or updates in near real time.
    #[serde(rename = "realtime")]
    Realtime,
    /// Data arrives with a lag of one to two days.
    #[serde(rename = "delayed")]
    Delayed,
    /// Data appears only once the weekly report for the period is built.
    #[serde(rename = "pending_week")]
    PendingWeeklyReport,
    /// Unknown metric.
    #[serde(rename = "unavailable")]
    Unavailable,
}

impl MetricAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricAvailability::Realtime => "realtime",
            MetricAvailability::Delayed => "delayed",
            MetricAvailability::PendingWeeklyReport => "pending_week",
            MetricAvailability::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for MetricAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source category of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricTier {
    Operational,
    MarketplaceFeed,
    WeeklyReport,
}

const OPERATIONAL: &[&str] = &[
    "ordersCount",
    "ordersSum",
    "cancellations",
    "stockQuantity",
    "inTransit",
    "cartAdds",
];

const MARKETPLACE_FEED: &[&str] = &[
    "views",
    "conversion",
    "buyouts",
    "buyoutRate",
    "returns",
    "adSpend",
    "drr",
];

const WEEKLY_REPORT: &[&str] = &[
    "salesGross",
    "salesNet",
    "margin",
    "marginPercent",
    "commission",
    "logisticsCost",
    "storageCost",
    "acceptanceCost",
    "penalties",
    "payout",
];

/// Category of `metric_key`, or `None` for unknown keys.
pub fn metric_tier(metric_key: &str) -> Option<MetricTier> {
    if OPERATIONAL.contains(&metric_key) {
        Some(MetricTier::Operational)
    } else if MARKETPLACE_FEED.contains(&metric_key) {
        Some(MetricTier::MarketplaceFeed)
    } else if WEEKLY_REPORT.contains(&metric_key) {
        Some(MetricTier::WeeklyReport)
    } else {
        None
    }
}

/// Classify `metric_key` for `period`.
///
/// Any period that is no longer open is `Realtime`. For the open period
/// the metric's tier decides; unknown keys are `Unavailable`.
pub fn classify(metric_key: &str, period: Period, clock: &dyn Clock) -> MetricAvailability {
    if !is_current_period(period, clock) {
        return MetricAvailability::Realtime;
    }

    match metric_tier(metric_key) {
        Some(MetricTier::Operational) => MetricAvailability::Realtime,
        Some(MetricTier::MarketplaceFeed) => MetricAvailability::Delayed,
        Some(MetricTier::WeeklyReport) => MetricAvailability::PendingWeeklyReport,
        None => MetricAvailability::Unavailable,
    }
}

/// Estimated publication date of the weekly report for `week`: the first
/// Tuesday strictly after the week's Sunday.
///
/// This is a business-process estimate taken from the usual report
/// schedule, not a guarantee made by the backend.
pub fn expected_report_date(week: WeekId) -> NaiveDate {
    next_weekday_after(week_end(week), REPORT_WEEKDAY)
}

/// Estimated date when weekly-report metrics cover all of `month`: the
/// report for the week containing the month's last day.
pub fn expected_report_date_for_month(month: MonthId) -> NaiveDate {
    expected_report_date(WeekId::containing(month_end(month)))
}

/// Availability plus the user-facing explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub metric: String,
    pub period: Period,
    pub availability: MetricAvailability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_report_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Classify `metric_key` and attach the expected report date and a message
/// for metrics that are not fully available yet.
pub fn describe(metric_key: &str, period: Period, clock: &dyn Clock) -> AvailabilityReport {
    let availability = classify(metric_key, period, clock);

    let expected_report_date = match availability {
        MetricAvailability::PendingWeeklyReport => Some(match period {
            Period::Week(week) => expected_report_date(week),
            Period::Month(month) => expected_report_date_for_month(month),
        }),
        _ => None,
    };

    let note = match availability {
        MetricAvailability::Realtime => None,
        MetricAvailability::Delayed => {
            Some("Данные маркетплейса поступают с задержкой 1–2 дня".to_string())
        }
        MetricAvailability::PendingWeeklyReport => expected_report_date.map(|date| {
            format!(
                "Появится после формирования еженедельного отчёта, ориентировочно {}",
                date.format("%d.%m.%Y")
            )
        }),
        MetricAvailability::Unavailable => Some("Метрика недоступна".to_string()),
    };

    AvailabilityReport {
        metric: metric_key.to_string(),
        period,
        availability,
        expected_report_date,
        note,
    }
}
