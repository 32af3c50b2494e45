use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{InputOptions, classify_input, parse_status_filter, retain_status};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ClassifyData;

#[derive(Debug, Default, Clone)]
pub struct ClassifyRunOptions<'a> {
    pub input: InputOptions<'a>,
    /// Long-term status label; only matching entities are listed.
    pub status: Option<String>,
}

impl<'a> From<InputOptions<'a>> for ClassifyRunOptions<'a> {
    fn from(input: InputOptions<'a>) -> Self {
        Self { input, status: None }
    }
}

pub fn run(path: &str, rules_path: Option<&Path>, status: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ClassifyRunOptions {
        input: InputOptions::new(path, rules_path),
        status: status.map(str::to_string),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ClassifyRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let status_filter = parse_status_filter(options.status.as_deref(), "classify")?;
    let run = classify_input(&options.input)?;
    let entities = retain_status(run.classified, status_filter);
    let fallback_count = entities
        .iter()
        .filter(|entity| entity.result.is_fallback)
        .count();

    success(
        "classify",
        ClassifyData {
            input: run.input,
            rules: run.rules,
            status_filter,
            fallback_count,
            entities,
        },
    )
}
