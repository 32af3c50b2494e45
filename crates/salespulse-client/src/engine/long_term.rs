use serde::{Deserialize, Serialize};

use crate::engine::condition::{MetricCondition, Operator, check_condition, format_percent};
use crate::engine::metrics::{MetricKey, MetricSet};
use crate::engine::rule::{ClassificationRule, matches_rule};
use crate::engine::status::LongTermStatus;
use crate::rules::model::{FallbackRule, FallbackRules, LongTermRules};

pub const EXPLANATION_FALLBACK: &str = "fallback rule";
pub const EXPLANATION_DEFAULT: &str = "no rule matched — default";

/// One audit-trail row: the configured condition next to the entity's actual value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparisonRow {
    pub metric: String,
    pub name: String,
    pub period: String,
    pub rule: String,
    pub actual: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMarker {
    Fallback,
    Default,
}

/// Which rule produced a long-term status: a 1-based primary rule number, or
/// a marker for the fallback and default paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleIndex {
    Primary(usize),
    Marker(RuleMarker),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongTermOutcome {
    pub status: LongTermStatus,
    pub is_fallback: bool,
    pub explanation: String,
    pub rule_index: RuleIndex,
    pub metrics_comparison: Vec<MetricComparisonRow>,
}

/// Assigns a long-term status.
///
/// Primary rules are tried in [`LongTermStatus::PRIORITY`] order, and within
/// a status in slot order; the first full match wins. Otherwise fallback
/// rules are tried in [`LongTermStatus::FALLBACK_ORDER`]. Otherwise the
/// entity is `stable` with `is_fallback` set and no comparison rows.
pub fn classify_long_term(
    metrics: &MetricSet,
    long: &LongTermRules,
    fallback: &FallbackRules,
) -> LongTermOutcome {
    for status in LongTermStatus::PRIORITY {
        for (index, rule) in long.get(status).active_rules().iter().enumerate() {
            if matches_rule(metrics, rule) {
                return LongTermOutcome {
                    status,
                    is_fallback: false,
                    explanation: format!("matched rule {}", index + 1),
                    rule_index: RuleIndex::Primary(index + 1),
                    metrics_comparison: build_rule_comparison(metrics, rule),
                };
            }
        }
    }

    for status in LongTermStatus::FALLBACK_ORDER {
        let Some(rule) = fallback.get(status) else {
            continue;
        };
        if fallback_matches(metrics, rule) {
            return LongTermOutcome {
                status,
                is_fallback: true,
                explanation: EXPLANATION_FALLBACK.to_string(),
                rule_index: RuleIndex::Marker(RuleMarker::Fallback),
                metrics_comparison: vec![comparison_row(
                    metrics,
                    rule.metric,
                    &fallback_condition(rule),
                )],
            };
        }
    }

    LongTermOutcome {
        status: LongTermStatus::TERMINAL_DEFAULT,
        is_fallback: true,
        explanation: EXPLANATION_DEFAULT.to_string(),
        rule_index: RuleIndex::Marker(RuleMarker::Default),
        metrics_comparison: Vec::new(),
    }
}

/// Single-metric threshold test. Only `>=`, `>`, `<=` and `<` on the three
/// long-term metrics can match.
pub fn fallback_matches(metrics: &MetricSet, rule: &FallbackRule) -> bool {
    if !MetricKey::RULE_SLOTS.contains(&rule.metric) {
        return false;
    }
    if !matches!(
        rule.operator,
        Operator::Gte | Operator::Gt | Operator::Lte | Operator::Lt
    ) {
        return false;
    }
    check_condition(metrics.raw(rule.metric), &fallback_condition(rule))
}

/// One row per enabled condition of the matched rule.
pub fn build_rule_comparison(
    metrics: &MetricSet,
    rule: &ClassificationRule,
) -> Vec<MetricComparisonRow> {
    rule.enabled_conditions()
        .map(|(key, condition)| comparison_row(metrics, key, condition))
        .collect()
}

fn fallback_condition(rule: &FallbackRule) -> MetricCondition {
    MetricCondition::new(rule.operator.clone(), rule.value)
}

fn comparison_row(
    metrics: &MetricSet,
    key: MetricKey,
    condition: &MetricCondition,
) -> MetricComparisonRow {
    let actual = metrics.raw(key);
    MetricComparisonRow {
        metric: key.as_str().to_string(),
        name: key.display_name().to_string(),
        period: key.period().to_string(),
        rule: condition.describe(),
        actual: format_percent(actual),
        passed: check_condition(actual, condition),
    }
}
