use std::fmt;
use std::process::ExitCode;

use periodkit_core::PeriodError;
use serde::Serialize;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_INPUT_ERROR: u8 = 2;
pub const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Runtime,
}

const GENERIC_INPUT_CODE: &str = "invalid_input";
const GENERIC_RUNTIME_CODE: &str = "runtime_error";

/// CLI failure with its exit-code class and a machine-readable code.
///
/// Errors raised by the period engine keep the engine's variant name as
/// their code, so scripts can tell `invalid_week_number` from
/// `invalid_format` without parsing the message.
#[derive(Debug)]
pub struct CliError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Input,
            code: GENERIC_INPUT_CODE,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code: GENERIC_RUNTIME_CODE,
            message: message.into(),
        }
    }

    /// Input error for an argument the period engine rejected.
    pub fn period(context: impl fmt::Display, err: PeriodError) -> Self {
        Self {
            kind: ErrorKind::Input,
            code: err.kind(),
            message: format!("{}: {}", context, err),
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Input => EXIT_INPUT_ERROR,
            ErrorKind::Runtime => EXIT_RUNTIME_ERROR,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<PeriodError> for CliError {
    fn from(err: PeriodError) -> Self {
        Self {
            kind: ErrorKind::Input,
            code: err.kind(),
            message: err.to_string(),
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
    kind: &'static str,
    exit_code: u8,
}

pub fn render_error(err: &CliError, output_format: OutputFormat) -> ExitCode {
    match output_format {
        OutputFormat::Json => {
            let envelope = ErrorOutput {
                error: err.message.clone(),
                kind: err.code,
                exit_code: err.exit_code(),
            };

            match serde_json::to_string_pretty(&envelope) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", err.message),
            }
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", err.message);
        }
    }

    ExitCode::from(err.exit_code())
}

pub fn output_format_hint(s: &str) -> OutputFormat {
    if s.eq_ignore_ascii_case("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}

pub fn parse_output_format(s: &str) -> CliResult<OutputFormat> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "text" => Ok(OutputFormat::Text),
        _ => Err(CliError::input(format!(
            "Invalid output_format '{}'. Expected: json, text",
            s
        ))),
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use periodkit_core::WeekId;

    #[test]
    fn period_errors_keep_their_variant_as_code() {
        let err = "2026-W54".parse::<WeekId>().unwrap_err();
        let cli = CliError::period("Invalid week '2026-W54'", err);
        assert_eq!(cli.code(), "invalid_week_number");
        assert_eq!(cli.exit_code(), EXIT_INPUT_ERROR);
        assert!(cli.to_string().starts_with("Invalid week '2026-W54': "));
    }

    #[test]
    fn converted_period_error_is_input_error() {
        let cli = CliError::from(PeriodError::InvalidQuarter(5));
        assert_eq!(cli.code(), "invalid_quarter");
        assert_eq!(cli.exit_code(), EXIT_INPUT_ERROR);
    }

    #[test]
    fn generic_codes() {
        assert_eq!(CliError::input("bad").code(), "invalid_input");
        assert_eq!(CliError::runtime("io").exit_code(), EXIT_RUNTIME_ERROR);
        assert_eq!(CliError::runtime("io").code(), "runtime_error");
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("yaml").unwrap_err().code(), "invalid_input");
        assert_eq!(output_format_hint("yaml"), OutputFormat::Text);
    }
}
