use std::path::Path;

use tracing::debug;

use crate::ClientResult;
use crate::commands::common::read_rules_document;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RulesCheckData, RulesDefaultsData};
use crate::rules::defaults::default_rules_config;
use crate::state::absolutize;

/// Prints the built-in configuration, a complete starting point for a rules document.
pub fn defaults() -> ClientResult<SuccessEnvelope> {
    success(
        "rules defaults",
        RulesDefaultsData {
            config: default_rules_config(),
        },
    )
}

/// Migrates and merges a rules document without classifying anything.
pub fn check(path: &Path) -> ClientResult<SuccessEnvelope> {
    let path = absolutize(path)?;
    let merged = read_rules_document(&path)?;
    debug!(rules = %path.display(), shape = ?merged.shape, "checked rules document");

    let matches_defaults = merged.config == default_rules_config();
    success(
        "rules check",
        RulesCheckData {
            path: path.display().to_string(),
            shape: merged.shape,
            matches_defaults,
            config: merged.config,
        },
    )
}
