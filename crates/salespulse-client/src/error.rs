use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const ENTITY_HELP_COMMAND: &str = "salespulse classify --help";
pub(crate) const RULES_HELP_COMMAND: &str = "salespulse rules defaults";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `salespulse {cmd} --help` for usage."),
            None => "Run `salespulse --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_entity_input(message: &str) -> Self {
        Self::new(
            "invalid_entity_input",
            message,
            vec![
                "Provide entities as a JSON array of objects or as CSV with a header row."
                    .to_string(),
                format!("Run `{ENTITY_HELP_COMMAND}` to review the expected fields."),
            ],
        )
    }

    pub fn invalid_entity_format(message: &str, received_format: &str) -> Self {
        Self::invalid_entity_input(message).with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn entity_schema_mismatch(expected_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        Self::new(
            "entity_schema_mismatch",
            "CSV headers do not include any metric columns.",
            vec![
                "Include at least one of the metric_12v12, metric_6v6, metric_3v3, metric_2v2 headers."
                    .to_string(),
                format!("Run `{ENTITY_HELP_COMMAND}` to review the expected fields."),
            ],
        )
        .with_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn invalid_metric_value(row: usize, column: &str, raw: &str) -> Self {
        Self::new(
            "invalid_metric_value",
            &format!("Row {row}: `{column}` must be a number or empty, got `{raw}`."),
            vec![
                "Fix the value in your source file, or leave the cell empty to treat it as missing."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "row": row,
            "column": column,
            "value": raw,
        }))
    }

    pub fn entity_not_found(entity_id: &str) -> Self {
        Self::new(
            "entity_not_found",
            &format!("No entity with id `{entity_id}` was found in the input."),
            vec![
                "Run `salespulse classify <path>` to list entity ids.".to_string(),
                "Retry with an id from that listing.".to_string(),
            ],
        )
        .with_data(json!({
            "entity_id": entity_id,
        }))
    }

    pub fn rules_not_found(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "rules_not_found",
            &format!("Could not read rules document `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                format!("Run `{RULES_HELP_COMMAND}` to print a complete starting document."),
            ],
        )
        .with_data(json!({
            "rules_path": location,
        }))
    }

    pub fn rules_invalid(source: &str, detail: &str) -> Self {
        Self::new(
            "rules_invalid",
            &format!("Rules document `{source}` is not valid: {detail}"),
            vec![
                "Fix the reported field; omitted fields fall back to defaults.".to_string(),
                format!("Run `{RULES_HELP_COMMAND}` to compare against the built-in shape."),
            ],
        )
        .with_data(json!({
            "rules_source": source,
        }))
    }

    pub fn export_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "export_failed",
            &format!("Could not write export `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or pass a writable `--out-dir`."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
