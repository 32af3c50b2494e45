use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{InputOptions, classify_input};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::AlertsData;
use crate::intelligence::alerts::select_alerts;
use crate::intelligence::policy::{ALERT_POLICY_V1, ALERT_POLICY_VERSION};

pub fn run(path: &str, rules_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    run_with_options(InputOptions::new(path, rules_path))
}

#[doc(hidden)]
pub fn run_with_options(options: InputOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let run = classify_input(&options)?;
    let alerts = select_alerts(&run.classified, ALERT_POLICY_V1);

    success(
        "alerts",
        AlertsData {
            policy_version: ALERT_POLICY_VERSION.to_string(),
            rules: run.rules,
            alerts,
        },
    )
}
