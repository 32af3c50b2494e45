use serde::Serialize;

use crate::engine::apply::ClassifiedEntity;
use crate::engine::long_term::{MetricComparisonRow, RuleIndex};
use crate::engine::metrics::MetricSet;
use crate::engine::status::{LongTermStatus, ShortTermStatus};
use crate::input::parse::EntityFormat;
use crate::intelligence::alerts::AlertEntry;
use crate::intelligence::rankings::Rankings;
use crate::intelligence::summary::ClassificationSummary;
use crate::rules::merge::ConfigShape;
use crate::rules::model::RulesConfig;
use crate::state::RulesSourceKind;

#[derive(Debug, Clone, Serialize)]
pub struct InputSourceInfo {
    pub kind: String,
    pub path: Option<String>,
    pub format: EntityFormat,
    pub entity_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesSourceInfo {
    pub kind: RulesSourceKind,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ConfigShape>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    pub input: InputSourceInfo,
    pub rules: RulesSourceInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<LongTermStatus>,
    pub fallback_count: usize,
    pub entities: Vec<ClassifiedEntity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainData {
    pub entity_id: String,
    pub name: Option<String>,
    pub metrics: MetricSet,
    pub status_long: LongTermStatus,
    pub status_short: ShortTermStatus,
    pub is_fallback: bool,
    pub status_explanation: String,
    pub status_rule_index: RuleIndex,
    pub metrics_comparison: Vec<MetricComparisonRow>,
    pub rules: RulesSourceInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertsData {
    pub policy_version: String,
    pub rules: RulesSourceInfo,
    pub alerts: Vec<AlertEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub rules: RulesSourceInfo,
    #[serde(flatten)]
    pub summary: ClassificationSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub path: String,
    pub file_name: String,
    pub rows_written: usize,
    pub columns: Vec<String>,
    pub rules: RulesSourceInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<LongTermStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingsData {
    pub rules: RulesSourceInfo,
    #[serde(flatten)]
    pub rankings: Rankings,
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesDefaultsData {
    pub config: RulesConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesCheckData {
    pub path: String,
    pub shape: ConfigShape,
    pub matches_defaults: bool,
    pub config: RulesConfig,
}
