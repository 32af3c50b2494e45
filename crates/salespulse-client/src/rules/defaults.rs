use crate::engine::condition::{MetricCondition, Operator};
use crate::engine::metrics::MetricKey;
use crate::engine::rule::ClassificationRule;
use crate::rules::model::{
    FallbackRule, FallbackRules, LongTermRules, LongTermStatusConfig, MAX_RULES_PER_STATUS,
    RulesConfig, ShortTermRules, ShortTermStatusConfig,
};

/// Built-in configuration that classifies any entity with zero user input.
///
/// Every status carries all rule slots (only the first enabled) so the merge
/// step always has a default to fall back to, field by field.
pub fn default_rules_config() -> RulesConfig {
    RulesConfig {
        long: default_long_rules(),
        short: default_short_rules(),
        fallback: Some(default_fallback_rules()),
    }
}

pub fn default_long_rules() -> LongTermRules {
    LongTermRules {
        surge: primary(MetricCondition::new(Operator::Gte, 20.0)),
        growth: primary(MetricCondition::between(5.0, 20.0)),
        stable: primary(MetricCondition::between(-10.0, 10.0)),
        decline: primary(MetricCondition::between(-30.0, -10.0)),
        crash: primary(MetricCondition::new(Operator::Lt, -30.0)),
    }
}

pub fn default_short_rules() -> ShortTermRules {
    ShortTermRules {
        surge: rung(15.0),
        stable: rung(-10.0),
        decline: rung(-25.0),
    }
}

pub fn default_fallback_rules() -> FallbackRules {
    FallbackRules {
        crash: fallback(MetricKey::M12v12, Operator::Lt, -30.0),
        decline: fallback(MetricKey::M6v6, Operator::Lt, -10.0),
        surge: fallback(MetricKey::M3v3, Operator::Gte, 20.0),
        growth: fallback(MetricKey::M6v6, Operator::Gte, 5.0),
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        default_rules_config()
    }
}

impl Default for FallbackRules {
    fn default() -> Self {
        default_fallback_rules()
    }
}

fn primary(condition: MetricCondition) -> LongTermStatusConfig {
    let mut rules = Vec::with_capacity(MAX_RULES_PER_STATUS);
    rules.push(ClassificationRule::on_12v12(condition));
    while rules.len() < MAX_RULES_PER_STATUS {
        rules.push(ClassificationRule::disabled());
    }
    LongTermStatusConfig { rules }
}

fn rung(threshold: f64) -> ShortTermStatusConfig {
    ShortTermStatusConfig {
        threshold,
        operator: Operator::Gte,
    }
}

fn fallback(metric: MetricKey, operator: Operator, value: f64) -> FallbackRule {
    FallbackRule {
        metric,
        operator,
        value,
    }
}
