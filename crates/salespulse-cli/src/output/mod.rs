mod classify_text;
mod error_text;
mod format;
mod json;
mod mode;
mod rankings_text;
mod rules_text;

use std::io;

use salespulse_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "classify" => classify_text::render_classify(&success.data),
        "explain" => classify_text::render_explain(&success.data),
        "alerts" => classify_text::render_alerts(&success.data),
        "summary" => classify_text::render_summary(&success.data),
        "export" => classify_text::render_export(&success.data),
        "rankings" => rankings_text::render_rankings(&success.data),
        "rules defaults" => rules_text::render_rules_defaults(&success.data),
        "rules check" => rules_text::render_rules_check(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
