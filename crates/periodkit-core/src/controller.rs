//! Period selection state.
//!
//! [`PeriodController`] owns the dashboard's selected week and month and
//! keeps the URL and the stored preference in step with them. Two rules
//! matter:
//!
//! - Switching to month mode always selects the month of the last
//!   *completed* week, never the month of the selected week. The selected
//!   week may be the current one, which has no report yet, and deriving
//!   the month from it can select a month the backend cannot serve.
//! - Malformed identifiers handed to [`PeriodController::set_week`] or
//!   [`PeriodController::set_month`] are ignored. The calendar functions
//!   are strict; this layer is forgiving so a bad URL cannot break the page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::{
    is_current_period, month_from_week, period_range, previous_month, previous_week,
};
use crate::clock::Clock;
use crate::label::{format_month_label, format_week_label};
use crate::models::{DateParams, MonthId, Period, PeriodType, WeekId};
use crate::ports::{CacheInvalidator, CompletedWeekProvider, KeyValueStore, QueryParamStore};

/// Query parameter holding the selected week.
pub const PARAM_WEEK: &str = "week";
/// Query parameter holding the selected month.
pub const PARAM_MONTH: &str = "month";
/// Query parameter holding the period type.
pub const PARAM_TYPE: &str = "type";

/// Controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Storage key of the persisted period type.
    pub preference_key: String,
    /// Tags sent to the cache invalidator on refresh.
    pub invalidation_tags: Vec<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            preference_key: "dashboard.periodType".to_string(),
            invalidation_tags: vec!["dashboard".to_string(), "analytics".to_string()],
        }
    }
}

/// Capabilities the controller depends on.
pub struct Ports {
    pub clock: Box<dyn Clock>,
    pub completed_week: Box<dyn CompletedWeekProvider>,
    pub preferences: Box<dyn KeyValueStore>,
    pub query: Box<dyn QueryParamStore>,
    pub invalidator: Box<dyn CacheInvalidator>,
}

/// Snapshot of the period selection.
///
/// `previous_week` and `previous_month` are always derived from the
/// selected values; there is no way to set them on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodState {
    period_type: PeriodType,
    selected_week: WeekId,
    selected_month: MonthId,
    previous_week: WeekId,
    previous_month: MonthId,
    last_refresh: DateTime<Utc>,
    is_loading: bool,
}

impl PeriodState {
    fn new(period_type: PeriodType, week: WeekId, month: MonthId, now: DateTime<Utc>) -> Self {
        PeriodState {
            period_type,
            selected_week: week,
            selected_month: month,
            previous_week: previous_week(week),
            previous_month: previous_month(month),
            last_refresh: now,
            is_loading: true,
        }
    }

    fn select_week(&mut self, week: WeekId) {
        self.selected_week = week;
        self.previous_week = previous_week(week);
    }

    fn select_month(&mut self, month: MonthId) {
        self.selected_month = month;
        self.previous_month = previous_month(month);
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    pub fn selected_week(&self) -> WeekId {
        self.selected_week
    }

    pub fn selected_month(&self) -> MonthId {
        self.selected_month
    }

    pub fn previous_week(&self) -> WeekId {
        self.previous_week
    }

    pub fn previous_month(&self) -> MonthId {
        self.previous_month
    }

    pub fn last_refresh(&self) -> DateTime<Utc> {
        self.last_refresh
    }

    /// True until the first [`PeriodController::initialize`] completes.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The selected week or month, whichever the period type makes active.
    pub fn active_period(&self) -> Period {
        match self.period_type {
            PeriodType::Week => Period::Week(self.selected_week),
            PeriodType::Month => Period::Month(self.selected_month),
        }
    }

    /// The active period as `{startDate, endDate}`.
    pub fn date_params(&self) -> DateParams {
        period_range(self.active_period()).into()
    }
}

/// Owner of the period selection for one mounted dashboard.
pub struct PeriodController {
    state: PeriodState,
    ports: Ports,
    config: ControllerConfig,
}

impl PeriodController {
    /// Create a controller in its loading state.
    ///
    /// Until [`initialize`](Self::initialize) runs, the state holds the
    /// system default: week mode on the last completed week.
    pub fn new(ports: Ports, config: ControllerConfig) -> Self {
        let last_completed = ports.completed_week.last_completed_week();
        let state = PeriodState::new(
            PeriodType::Week,
            last_completed,
            month_from_week(last_completed),
            ports.clock.now(),
        );

        PeriodController {
            state,
            ports,
            config,
        }
    }

    /// Create and initialize a controller.
    pub fn mount(ports: Ports, config: ControllerConfig) -> Self {
        let mut controller = PeriodController::new(ports, config);
        controller.initialize();
        controller
    }

    pub fn state(&self) -> &PeriodState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Hydrate the state from the URL, then the stored preference, then
    /// the default, and reflect the result into the URL.
    ///
    /// Without a usable `type` parameter the URL's selector decides: a
    /// `week` link opens week mode, a `month`-only link opens month mode.
    ///
    /// Only the first call has an effect; `is_loading` is cleared once.
    pub fn initialize(&mut self) {
        if !self.state.is_loading {
            return;
        }

        let last_completed = self.ports.completed_week.last_completed_week();
        let url_type = self.query_value::<PeriodType>(PARAM_TYPE);
        let url_week = self.query_value::<WeekId>(PARAM_WEEK);
        let url_month = self.query_value::<MonthId>(PARAM_MONTH);

        let linked_type = match (url_week, url_month) {
            (Some(_), _) => Some(PeriodType::Week),
            (None, Some(_)) => Some(PeriodType::Month),
            (None, None) => None,
        };

        let period_type = if let Some(period_type) = url_type {
            debug!(%period_type, "period type from url");
            period_type
        } else if let Some(period_type) = linked_type {
            debug!(%period_type, "period type from url selector");
            period_type
        } else if let Some(period_type) = self.stored_period_type() {
            debug!(%period_type, "period type from stored preference");
            period_type
        } else {
            PeriodType::default()
        };

        let week = url_week.unwrap_or(last_completed);
        let month = match (url_month, period_type, url_week) {
            (Some(month), _, _) => month,
            // An explicitly linked week also picks its month, as `set_week` does.
            (None, PeriodType::Week, Some(week)) => month_from_week(week),
            _ => month_from_week(last_completed),
        };

        self.state.period_type = period_type;
        self.state.select_week(week);
        self.state.select_month(month);
        self.state.is_loading = false;
        self.sync_url();

        debug!(
            %period_type,
            week = %self.state.selected_week,
            month = %self.state.selected_month,
            %last_completed,
            "period state initialized"
        );
    }

    /// Switch between week and month mode and persist the choice.
    ///
    /// Entering month mode selects the month of the last completed week.
    pub fn set_period_type(&mut self, period_type: PeriodType) {
        if period_type == PeriodType::Month {
            let last_completed = self.ports.completed_week.last_completed_week();
            let month = month_from_week(last_completed);
            debug!(%last_completed, %month, "month derived from last completed week");
            self.state.select_month(month);
        }

        self.state.period_type = period_type;
        self.ports
            .preferences
            .set(&self.config.preference_key, period_type.as_str());
        self.sync_url();
    }

    /// Select a week and the month it belongs to.
    ///
    /// Returns `false` and leaves the state untouched when `week_id` is
    /// not a valid `YYYY-Www`.
    pub fn set_week(&mut self, week_id: &str) -> bool {
        let week = match week_id.parse::<WeekId>() {
            Ok(week) => week,
            Err(err) => {
                debug!(input = week_id, error = %err, "ignoring invalid week");
                return false;
            }
        };

        self.state.select_week(week);
        self.state.select_month(month_from_week(week));
        self.sync_url();
        true
    }

    /// Select a month without touching the selected week.
    ///
    /// Returns `false` and leaves the state untouched when `month_id` is
    /// not a valid `YYYY-MM`.
    pub fn set_month(&mut self, month_id: &str) -> bool {
        let month = match month_id.parse::<MonthId>() {
            Ok(month) => month,
            Err(err) => {
                debug!(input = month_id, error = %err, "ignoring invalid month");
                return false;
            }
        };

        self.state.select_month(month);
        self.sync_url();
        true
    }

    /// Record a refresh and ask the data layer to drop cached responses.
    ///
    /// Does not change the selection and does not wait for refetching.
    pub fn refresh(&mut self) {
        self.state.last_refresh = self.ports.clock.now();
        for tag in &self.config.invalidation_tags {
            self.ports.invalidator.invalidate(tag);
        }
        info!(
            at = %self.state.last_refresh,
            tags = ?self.config.invalidation_tags,
            "period data refreshed"
        );
    }

    pub fn active_period(&self) -> Period {
        self.state.active_period()
    }

    /// `{startDate, endDate}` of the active period.
    pub fn date_params(&self) -> DateParams {
        self.state.date_params()
    }

    /// Whether the active period is still open and its data incomplete.
    pub fn is_incomplete(&self) -> bool {
        is_current_period(self.active_period(), &*self.ports.clock)
    }

    /// Display label of the active period.
    pub fn active_label(&self) -> String {
        let clock = &*self.ports.clock;
        match self.active_period() {
            Period::Week(week) => format_week_label(week, clock),
            Period::Month(month) => format_month_label(month, clock),
        }
    }

    fn query_value<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.ports.query.get(name)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!(param = name, value = %raw, "ignoring invalid url parameter");
                None
            }
        }
    }

    fn stored_period_type(&self) -> Option<PeriodType> {
        let raw = self.ports.preferences.get(&self.config.preference_key)?;
        match raw.parse() {
            Ok(period_type) => Some(period_type),
            Err(_) => {
                warn!(
                    key = %self.config.preference_key,
                    value = %raw,
                    "stored period type unrecognized, ignoring"
                );
                None
            }
        }
    }

    /// Write the active selector to the URL and drop the inactive one.
    fn sync_url(&self) {
        let query = &self.ports.query;
        query.set(PARAM_TYPE, self.state.period_type.as_str());
        match self.state.period_type {
            PeriodType::Week => {
                query.set(PARAM_WEEK, &self.state.selected_week.to_string());
                query.remove(PARAM_MONTH);
            }
            PeriodType::Month => {
                query.set(PARAM_MONTH, &self.state.selected_month.to_string());
                query.remove(PARAM_WEEK);
            }
        }
    }
}
