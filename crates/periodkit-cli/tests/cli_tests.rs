use std::fs;
use std::process::{Command, Output};

fn periodkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_periodkit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute periodkit")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

#[test]
fn invalid_week_is_input_error() {
    let output = periodkit(&["week", "2026-W54"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("2026-W54"));
}

#[test]
fn input_error_as_json_envelope() {
    let output = periodkit(&["month", "2026-13", "--output-format", "json"]);
    assert_eq!(output.status.code(), Some(2));

    let envelope: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["exit_code"], 2);
    assert_eq!(envelope["kind"], "invalid_month_number");
    assert!(envelope["error"].as_str().unwrap().contains("2026-13"));
}

#[test]
fn envelope_kind_tells_format_from_range_errors() {
    let malformed = periodkit(&["week", "2026-5", "--output-format", "json"]);
    let envelope: serde_json::Value = serde_json::from_slice(&malformed.stderr).unwrap();
    assert_eq!(envelope["kind"], "invalid_format");

    let short_year = periodkit(&["week", "2025-W53", "--output-format", "json"]);
    let envelope: serde_json::Value = serde_json::from_slice(&short_year.stderr).unwrap();
    assert_eq!(envelope["kind"], "invalid_week_number");

    let bad_action = periodkit(&[
        "state",
        "--last-completed",
        "2026-W04",
        "--action",
        "quarter=1",
        "--output-format",
        "json",
    ]);
    let envelope: serde_json::Value = serde_json::from_slice(&bad_action.stderr).unwrap();
    assert_eq!(envelope["kind"], "invalid_input");
}

#[test]
fn invalid_output_format_is_input_error() {
    let output = periodkit(&["quarter", "2026", "1", "--output-format", "yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_today_and_timezone_are_input_errors() {
    assert_eq!(
        periodkit(&["--today", "17.10.2026", "week", "current"]).status.code(),
        Some(2)
    );
    assert_eq!(
        periodkit(&["--tz", "Mars/Olympus", "week", "current"]).status.code(),
        Some(2)
    );
}

#[test]
fn invalid_quarter_is_input_error() {
    assert_eq!(periodkit(&["quarter", "2026", "5"]).status.code(), Some(2));
}

#[test]
fn current_week_follows_today() {
    let output = periodkit(&[
        "--today",
        "2026-10-17",
        "week",
        "current",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["week"], "2026-W42");
    assert_eq!(json["endDate"], "2026-10-18");
    assert_eq!(json["isCurrent"], true);
}

#[test]
fn today_as_instant_uses_business_timezone() {
    // 22:30 UTC on Sunday 25 Jan is already Monday 26 Jan in Moscow.
    let moscow = periodkit(&[
        "--today",
        "2026-01-25T22:30:00Z",
        "week",
        "current",
        "--output-format",
        "json",
    ]);
    assert!(moscow.status.success());
    assert_eq!(stdout_json(&moscow)["week"], "2026-W05");

    let utc = periodkit(&[
        "--tz",
        "UTC",
        "--today",
        "2026-01-25T22:30:00Z",
        "week",
        "current",
        "--output-format",
        "json",
    ]);
    assert!(utc.status.success());
    assert_eq!(stdout_json(&utc)["week"], "2026-W04");
}

#[test]
fn week_text_output() {
    let output = periodkit(&["--today", "2026-10-17", "week", "2026-W06"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("2026-W06: 2026-02-02 to 2026-02-08"));
    assert!(stdout.contains("Month:           2026-02"));
}

#[test]
fn quarter_text_counts_weeks() {
    let output = periodkit(&["quarter", "2026", "1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("2026-W01—2026-W13 (13)"));
}

#[test]
fn custom_preset_as_weeks() {
    let output = periodkit(&[
        "--today",
        "2026-10-17",
        "preset",
        "custom",
        "--iso",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["period1"], "2026-W34—2026-W38");
    assert_eq!(json["period2"], "2026-W38—2026-W42");
    assert!(json.get("weekMismatch").is_none());
}

#[test]
fn unknown_preset_is_input_error() {
    assert_eq!(periodkit(&["preset", "wow"]).status.code(), Some(2));
}

#[test]
fn settled_month_metric_has_no_note() {
    let output = periodkit(&[
        "--today",
        "2026-10-17",
        "availability",
        "-m",
        "margin",
        "-p",
        "2026-09",
        "--type",
        "month",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["availability"], "realtime");
    assert!(json.get("note").is_none());
}

#[test]
fn availability_period_must_match_type() {
    let output = periodkit(&["availability", "-m", "margin", "-p", "2026-09"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn state_ignores_invalid_selection() {
    let output = periodkit(&[
        "--today",
        "2026-01-29",
        "state",
        "--last-completed",
        "2026-W04",
        "--action",
        "week=2026-W99",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["state"]["selectedWeek"], "2026-W04");
    assert_eq!(json["actions"][0]["accepted"], false);
    assert_eq!(json["url"], "type=week&week=2026-W04");
}

#[test]
fn state_rejects_malformed_action() {
    let output = periodkit(&[
        "state",
        "--last-completed",
        "2026-W04",
        "--action",
        "quarter=1",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn state_preference_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    let prefs = prefs.to_str().unwrap();

    let first = periodkit(&[
        "--today",
        "2026-01-29",
        "state",
        "--last-completed",
        "2026-W04",
        "--prefs",
        prefs,
        "--action",
        "type=month",
    ]);
    assert!(first.status.success());

    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(prefs).unwrap()).unwrap();
    assert_eq!(stored["dashboard.periodType"], "month");

    // No `type` in the URL, so the stored preference decides.
    let second = periodkit(&[
        "--today",
        "2026-01-29",
        "state",
        "--last-completed",
        "2026-W04",
        "--prefs",
        prefs,
        "--output-format",
        "json",
    ]);
    assert!(second.status.success());

    let json = stdout_json(&second);
    assert_eq!(json["state"]["periodType"], "month");
    assert_eq!(json["state"]["selectedMonth"], "2026-01");
    assert_eq!(json["url"], "month=2026-01&type=month");
}

#[test]
fn url_type_overrides_stored_preference() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    fs::write(&prefs, r#"{"dashboard.periodType": "month"}"#).unwrap();

    let output = periodkit(&[
        "--today",
        "2026-01-29",
        "state",
        "--last-completed",
        "2026-W04",
        "--prefs",
        prefs.to_str().unwrap(),
        "--url",
        "type=week&week=2026-W02",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["state"]["periodType"], "week");
    assert_eq!(json["state"]["selectedWeek"], "2026-W02");
    assert_eq!(json["incomplete"], false);
}

#[test]
fn month_link_without_type_opens_month_mode() {
    let output = periodkit(&[
        "--today",
        "2026-01-29",
        "state",
        "--last-completed",
        "2026-W04",
        "--url",
        "month=2025-09",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["state"]["periodType"], "month");
    assert_eq!(json["dateParams"]["startDate"], "2025-09-01");
    assert_eq!(json["url"], "month=2025-09&type=month");
}
