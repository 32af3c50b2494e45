use serde::Serialize;

use crate::engine::long_term::{MetricComparisonRow, RuleIndex, classify_long_term};
use crate::engine::metrics::EntityRecord;
use crate::engine::short_term::classify_short_term;
use crate::engine::status::{LongTermStatus, ShortTermStatus};
use crate::rules::model::{FallbackRules, RulesConfig};

/// Field names written onto a classified record.
pub const RESULT_FIELDS: [&str; 6] = [
    "status_long",
    "status_short",
    "is_fallback",
    "status_explanation",
    "status_rule_index",
    "metrics_comparison",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub status_long: LongTermStatus,
    pub status_short: ShortTermStatus,
    pub is_fallback: bool,
    pub status_explanation: String,
    pub status_rule_index: RuleIndex,
    pub metrics_comparison: Vec<MetricComparisonRow>,
}

/// An input record with its classification. Serializes as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedEntity {
    #[serde(flatten)]
    pub entity: EntityRecord,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

impl ClassifiedEntity {
    pub fn id_text(&self) -> Option<String> {
        self.entity.id_text()
    }

    pub fn is_inactive(&self) -> bool {
        self.entity.is_inactive()
    }
}

pub fn classify_entity(
    entity: &EntityRecord,
    config: &RulesConfig,
    fallback: &FallbackRules,
) -> ClassificationResult {
    let long = classify_long_term(&entity.metrics, &config.long, fallback);
    ClassificationResult {
        status_long: long.status,
        status_short: classify_short_term(&entity.metrics, &config.short),
        is_fallback: long.is_fallback,
        status_explanation: long.explanation,
        status_rule_index: long.rule_index,
        metrics_comparison: long.metrics_comparison,
    }
}

/// Classifies every entity against `config`, leaving the inputs untouched.
///
/// Result fields carried over from an earlier pass are dropped before the
/// fresh result is attached, so reclassifying classified output is stable.
pub fn apply_config(entities: &[EntityRecord], config: &RulesConfig) -> Vec<ClassifiedEntity> {
    let fallback = config.fallback.clone().unwrap_or_default();
    entities
        .iter()
        .map(|entity| {
            let mut record = entity.clone();
            for field in RESULT_FIELDS {
                record.attributes.remove(field);
            }
            let result = classify_entity(&record, config, &fallback);
            ClassifiedEntity {
                entity: record,
                result,
            }
        })
        .collect()
}
