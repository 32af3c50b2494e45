use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{InputOptions, classify_input};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SummaryData;
use crate::intelligence::summary::summarize;

pub fn run(path: &str, rules_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    run_with_options(InputOptions::new(path, rules_path))
}

#[doc(hidden)]
pub fn run_with_options(options: InputOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let run = classify_input(&options)?;
    success(
        "summary",
        SummaryData {
            rules: run.rules,
            summary: summarize(&run.classified),
        },
    )
}
