use serde::{Deserialize, Serialize};

use crate::engine::condition::{MetricCondition, check_condition};
use crate::engine::metrics::{MetricKey, MetricSet};

/// Conjunction of up to three metric conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub enabled: bool,
    pub metric_12v12: MetricCondition,
    pub metric_6v6: MetricCondition,
    pub metric_3v3: MetricCondition,
}

impl ClassificationRule {
    /// Rule that constrains only the 12v12 metric.
    pub fn on_12v12(condition: MetricCondition) -> Self {
        Self {
            enabled: true,
            metric_12v12: condition,
            metric_6v6: MetricCondition::disabled(),
            metric_3v3: MetricCondition::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            metric_12v12: MetricCondition::disabled(),
            metric_6v6: MetricCondition::disabled(),
            metric_3v3: MetricCondition::disabled(),
        }
    }

    pub fn condition(&self, key: MetricKey) -> Option<&MetricCondition> {
        match key {
            MetricKey::M12v12 => Some(&self.metric_12v12),
            MetricKey::M6v6 => Some(&self.metric_6v6),
            MetricKey::M3v3 => Some(&self.metric_3v3),
            MetricKey::M2v2 => None,
        }
    }

    pub fn condition_mut(&mut self, key: MetricKey) -> Option<&mut MetricCondition> {
        match key {
            MetricKey::M12v12 => Some(&mut self.metric_12v12),
            MetricKey::M6v6 => Some(&mut self.metric_6v6),
            MetricKey::M3v3 => Some(&mut self.metric_3v3),
            MetricKey::M2v2 => None,
        }
    }

    /// Enabled conditions paired with the metric they test, in slot order.
    pub fn enabled_conditions(&self) -> impl Iterator<Item = (MetricKey, &MetricCondition)> {
        MetricKey::RULE_SLOTS.into_iter().filter_map(|key| {
            self.condition(key)
                .filter(|condition| condition.enabled)
                .map(|condition| (key, condition))
        })
    }
}

/// True when the rule is enabled, has at least one enabled condition, and all
/// enabled conditions pass.
pub fn matches_rule(metrics: &MetricSet, rule: &ClassificationRule) -> bool {
    if !rule.enabled {
        return false;
    }

    let mut any_enabled = false;
    for (key, condition) in rule.enabled_conditions() {
        any_enabled = true;
        if !check_condition(metrics.raw(key), condition) {
            return false;
        }
    }

    any_enabled
}
