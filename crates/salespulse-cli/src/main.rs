mod cli;
mod dispatch;
mod output;
mod stdout_io;
mod telemetry;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use salespulse_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "SalesPulse - rule-based status classification for stores and products

Usage:
  salespulse <command>

Start here:
  salespulse classify <path>
  salespulse classify --help
  salespulse rules defaults
";

const TOP_LEVEL_HELP: &str = "SalesPulse - rule-based status classification for stores and products

USAGE: salespulse <command>

Classify your entities (JSON array or CSV, `-` for stdin):
  salespulse classify <path>                      Long-term and short-term status for every entity
  salespulse explain <path> <id>                  Rule-by-rule audit trail for one entity
  salespulse summary <path>                       Entity counts per status
  salespulse alerts <path>                        Active entities that need attention, worst first
  salespulse rankings <path>                      Top sales, growth and stability; inactive entities
  salespulse export <path>                        Write a dated CSV with the statuses appended

`classify` and `export` accept `--status <label>` to keep one long-term status.

Work with rules:
  salespulse rules defaults                       Print the built-in rules document
  salespulse rules check <rules.json>             Validate, migrate and merge a rules document

Every command accepts `--json` for machine-readable output.
Classification commands accept `--rules <path>`; otherwise $SALESPULSE_RULES,
then $SALESPULSE_HOME/rules.json, then the built-in defaults are used.

Run `salespulse <command> --help` for command usage.
";

fn main() -> ExitCode {
    telemetry::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                parse_error_with_command_hint(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Maps raw CLI args to the command path used in help hints, such as
/// "rules check". Entity paths and ids are never part of the hint.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["classify", ..] => Some("classify"),
        ["explain", ..] => Some("explain"),
        ["alerts", ..] => Some("alerts"),
        ["summary", ..] => Some("summary"),
        ["rankings", ..] => Some("rankings"),
        ["export", ..] => Some("export"),
        ["rules", "defaults", ..] => Some("rules defaults"),
        ["rules", "check", ..] => Some("rules check"),
        ["rules", ..] => Some("rules"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn parse_error_with_command_hint(clean_message: &str, command_hint: Option<&str>) -> ClientError {
    if command_hint == Some("explain") && clean_message.contains("<ENTITY_ID>") {
        return ClientError::invalid_argument_with_recovery(
            "`explain` needs an entity file and the id of one entity in it.",
            vec![
                "Run `salespulse classify <path>` to list entity ids.".to_string(),
                "Then run `salespulse explain <path> <id>`.".to_string(),
            ],
        );
    }

    ClientError::invalid_argument_for_command(clean_message, command_hint)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
}
