use std::path::Path;

use crate::commands::common::{InputOptions, classify_input};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ExplainData;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default, Clone)]
pub struct ExplainRunOptions<'a> {
    pub input: InputOptions<'a>,
    pub entity_id: String,
}

pub fn run(path: &str, entity_id: &str, rules_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ExplainRunOptions {
        input: InputOptions::new(path, rules_path),
        entity_id: entity_id.to_string(),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ExplainRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let entity_id = options.entity_id.trim();
    if entity_id.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "An entity id is required.",
            Some("explain"),
        ));
    }

    let run = classify_input(&options.input)?;
    let Some(classified) = run
        .classified
        .into_iter()
        .find(|entity| entity.id_text().as_deref() == Some(entity_id))
    else {
        return Err(ClientError::entity_not_found(entity_id));
    };

    let name = classified.entity.name().map(str::to_string);
    let result = classified.result;
    success(
        "explain",
        ExplainData {
            entity_id: entity_id.to_string(),
            name,
            metrics: classified.entity.metrics,
            status_long: result.status_long,
            status_short: result.status_short,
            is_fallback: result.is_fallback,
            status_explanation: result.status_explanation,
            status_rule_index: result.status_rule_index,
            metrics_comparison: result.metrics_comparison,
            rules: run.rules,
        },
    )
}
