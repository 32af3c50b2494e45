use std::io;

use salespulse_client::contracts::envelope::{ErrorContract, failure_from_error};
use salespulse_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::Value;

const JSON_VERSION: &str = "v1";

#[derive(Serialize)]
struct JsonSuccess<'a> {
    ok: bool,
    version: &'static str,
    data: &'a Value,
}

#[derive(Serialize)]
struct JsonFailure {
    error: ErrorContract,
}

/// Machine output drops the command name; scripts key off `ok` and `version`.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    to_pretty(&JsonSuccess {
        ok: true,
        version: JSON_VERSION,
        data: &success.data,
    })
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    to_pretty(&JsonFailure {
        error: failure_from_error(error).error,
    })
}

fn to_pretty(value: &impl Serialize) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
