use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::contracts::types::{InputSourceInfo, RulesSourceInfo};
use crate::engine::apply::{ClassifiedEntity, apply_config};
use crate::engine::status::LongTermStatus;
use crate::input::parse::parse_entities;
use crate::input::source::resolve_source;
use crate::rules::defaults::default_rules_config;
use crate::rules::merge::{MergedRules, merge_document};
use crate::rules::model::RulesConfig;
use crate::state::resolve_rules_source;
use crate::{ClientError, ClientResult};

/// Fallback share above which a classification run is worth a warning.
const FALLBACK_WARN_SHARE: f64 = 0.5;

/// Inputs shared by every command that classifies an entity document.
#[derive(Debug, Default, Clone)]
pub struct InputOptions<'a> {
    pub path: String,
    pub rules_path: Option<PathBuf>,
    pub stdin_override: Option<String>,
    pub home_override: Option<&'a Path>,
}

impl InputOptions<'_> {
    pub fn new(path: &str, rules_path: Option<&Path>) -> Self {
        Self {
            path: path.to_string(),
            rules_path: rules_path.map(Path::to_path_buf),
            stdin_override: None,
            home_override: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub info: RulesSourceInfo,
    pub config: RulesConfig,
}

#[derive(Debug, Clone)]
pub struct ClassificationRun {
    pub input: InputSourceInfo,
    pub rules: RulesSourceInfo,
    pub classified: Vec<ClassifiedEntity>,
}

impl ClassificationRun {
    pub fn fallback_count(&self) -> usize {
        self.classified
            .iter()
            .filter(|entity| entity.result.is_fallback)
            .count()
    }
}

/// Reads entities and rules, then classifies every entity.
pub fn classify_input(options: &InputOptions<'_>) -> ClientResult<ClassificationRun> {
    let rules = load_rules(options.rules_path.as_deref(), options.home_override)?;

    let source = resolve_source(&options.path, options.stdin_override.clone())?;
    let parsed = parse_entities(&source.content)?;
    debug!(
        source = source.label(),
        format = parsed.format.as_str(),
        entities = parsed.entities.len(),
        "parsed entity document"
    );

    let classified = apply_config(&parsed.entities, &rules.config);
    let run = ClassificationRun {
        input: InputSourceInfo {
            kind: source.kind.as_str().to_string(),
            path: source.source_ref.clone(),
            format: parsed.format,
            entity_count: parsed.entities.len(),
        },
        rules: rules.info,
        classified,
    };

    let fallback = run.fallback_count();
    let total = run.classified.len();
    if total > 0 && fallback as f64 / total as f64 > FALLBACK_WARN_SHARE {
        warn!(
            fallback,
            total,
            rules = run.rules.path.as_deref().unwrap_or("built-in defaults"),
            "most entities matched no primary rule; review the configured thresholds"
        );
    }

    Ok(run)
}

/// Parses a `--status` value into a long-term status label, case-insensitively.
pub fn parse_status_filter(
    raw: Option<&str>,
    command: &str,
) -> ClientResult<Option<LongTermStatus>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match LongTermStatus::parse(&raw.to_ascii_lowercase()) {
        Some(status) => Ok(Some(status)),
        None => {
            let labels = LongTermStatus::PRIORITY
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            Err(ClientError::invalid_argument_for_command(
                &format!("Unknown status `{}`. Use one of: {labels}.", raw.trim()),
                Some(command),
            ))
        }
    }
}

/// Keeps only entities whose long-term status matches `status`, in input order.
pub fn retain_status(
    classified: Vec<ClassifiedEntity>,
    status: Option<LongTermStatus>,
) -> Vec<ClassifiedEntity> {
    match status {
        Some(wanted) => classified
            .into_iter()
            .filter(|entity| entity.result.status_long == wanted)
            .collect(),
        None => classified,
    }
}

/// Resolves and loads the effective rules, merged against the built-in defaults.
pub fn load_rules(explicit: Option<&Path>, home_override: Option<&Path>) -> ClientResult<LoadedRules> {
    let source = resolve_rules_source(explicit, home_override)?;
    debug!(kind = ?source.kind(), rules = %source.label(), "resolved rules source");

    let Some(path) = source.path() else {
        return Ok(LoadedRules {
            info: RulesSourceInfo {
                kind: source.kind(),
                path: None,
                shape: None,
            },
            config: default_rules_config(),
        });
    };

    let merged = read_rules_document(path)?;
    debug!(shape = ?merged.shape, "merged rules document with defaults");

    Ok(LoadedRules {
        info: RulesSourceInfo {
            kind: source.kind(),
            path: Some(path.display().to_string()),
            shape: Some(merged.shape),
        },
        config: merged.config,
    })
}

pub fn read_rules_document(path: &Path) -> ClientResult<MergedRules> {
    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::rules_not_found(path, &error.to_string()))?;
    let label = path.display().to_string();
    let document = serde_json::from_str::<Value>(&body)
        .map_err(|error| ClientError::rules_invalid(&label, &error.to_string()))?;
    merge_document(&document, &label)
}
