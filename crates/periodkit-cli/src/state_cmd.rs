use std::collections::BTreeMap;
use std::process::ExitCode;

use periodkit_core::ports::{KeyValueStore, MemoryKeyValueStore, MemoryQueryParams, RecordingInvalidator};
use periodkit_core::{
    Clock, ControllerConfig, DateParams, PeriodController, PeriodState, PeriodType, Ports, WeekId,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::StateArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::file_store::JsonFileStore;
use crate::shared::parse_period_type;

/// One user interaction replayed against the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    SetType(PeriodType),
    SetWeek(String),
    SetMonth(String),
    Refresh,
}

impl Action {
    fn parse(s: &str) -> CliResult<Self> {
        if s == "refresh" {
            return Ok(Action::Refresh);
        }

        match s.split_once('=') {
            Some(("type", value)) => Ok(Action::SetType(parse_period_type(value)?)),
            Some(("week", value)) => Ok(Action::SetWeek(value.to_string())),
            Some(("month", value)) => Ok(Action::SetMonth(value.to_string())),
            _ => Err(CliError::input(format!(
                "Invalid action '{}'. Expected: type=week|month, week=YYYY-Www, month=YYYY-MM, refresh",
                s
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
struct ActionOutcome {
    action: String,
    accepted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateReport {
    state: PeriodState,
    date_params: DateParams,
    url: String,
    label: String,
    incomplete: bool,
    preferences: BTreeMap<String, String>,
    actions: Vec<ActionOutcome>,
    invalidated: Vec<String>,
}

enum Preferences {
    Memory(MemoryKeyValueStore),
    File(JsonFileStore),
}

impl Preferences {
    fn handle(&self) -> Box<dyn KeyValueStore> {
        match self {
            Preferences::Memory(store) => Box::new(store.clone()),
            Preferences::File(store) => Box::new(store.clone()),
        }
    }

    fn entries(&self) -> BTreeMap<String, String> {
        match self {
            Preferences::Memory(store) => store.entries(),
            Preferences::File(store) => store.entries(),
        }
    }
}

pub fn run_state(args: StateArgs, clock: Box<dyn Clock>, output_format: OutputFormat) -> CliResult<ExitCode> {
    let last_completed: WeekId = args.last_completed.parse().map_err(|e| {
        CliError::period(format!("Invalid --last-completed '{}'", args.last_completed), e)
    })?;
    let actions = args
        .actions
        .iter()
        .map(|raw| Action::parse(raw).map(|action| (raw.clone(), action)))
        .collect::<CliResult<Vec<_>>>()?;

    let query = MemoryQueryParams::from_query(&args.url);
    let invalidator = RecordingInvalidator::new();
    let preferences = match &args.prefs {
        Some(path) => Preferences::File(JsonFileStore::open(path)),
        None => Preferences::Memory(MemoryKeyValueStore::new()),
    };

    let ports = Ports {
        clock,
        completed_week: Box::new(move || last_completed),
        preferences: preferences.handle(),
        query: Box::new(query.clone()),
        invalidator: Box::new(invalidator.clone()),
    };
    let mut controller = PeriodController::mount(ports, ControllerConfig::default());

    let mut outcomes = Vec::with_capacity(actions.len());
    for (raw, action) in actions {
        let accepted = match action {
            Action::SetType(period_type) => {
                controller.set_period_type(period_type);
                true
            }
            Action::SetWeek(week) => controller.set_week(&week),
            Action::SetMonth(month) => controller.set_month(&month),
            Action::Refresh => {
                controller.refresh();
                true
            }
        };
        debug!(action = %raw, accepted, "action applied");
        outcomes.push(ActionOutcome {
            action: raw,
            accepted,
        });
    }

    let report = StateReport {
        state: controller.state().clone(),
        date_params: controller.date_params(),
        url: query.to_query(),
        label: controller.active_label(),
        incomplete: controller.is_incomplete(),
        preferences: preferences.entries(),
        actions: outcomes,
        invalidated: invalidator.tags(),
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            let state = &report.state;
            println!("{}: {}", state.period_type(), report.label);
            println!("  Week:            {} (previous {})", state.selected_week(), state.previous_week());
            println!("  Month:           {} (previous {})", state.selected_month(), state.previous_month());
            println!(
                "  Dates:           {} to {}",
                report.date_params.start_date, report.date_params.end_date
            );
            println!("  URL:             ?{}", report.url);
            for outcome in &report.actions {
                let status = if outcome.accepted { "ok" } else { "ignored" };
                println!("  Action {}: {}", outcome.action, status);
            }
            if !report.invalidated.is_empty() {
                println!("  Invalidated:     {}", report.invalidated.join(", "));
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
