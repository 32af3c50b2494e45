use serde::{Deserialize, Serialize};

use crate::engine::condition::Operator;
use crate::engine::metrics::MetricKey;
use crate::engine::rule::ClassificationRule;
use crate::engine::status::{LongTermStatus, ShortTermStatus};

/// Number of rule slots consulted per long-term status.
pub const MAX_RULES_PER_STATUS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermStatusConfig {
    pub rules: Vec<ClassificationRule>,
}

impl LongTermStatusConfig {
    /// Rules that take part in matching. Entries past the slot limit are ignored.
    pub fn active_rules(&self) -> &[ClassificationRule] {
        let end = self.rules.len().min(MAX_RULES_PER_STATUS);
        &self.rules[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermRules {
    pub surge: LongTermStatusConfig,
    pub growth: LongTermStatusConfig,
    pub stable: LongTermStatusConfig,
    pub decline: LongTermStatusConfig,
    pub crash: LongTermStatusConfig,
}

impl LongTermRules {
    pub fn get(&self, status: LongTermStatus) -> &LongTermStatusConfig {
        match status {
            LongTermStatus::Surge => &self.surge,
            LongTermStatus::Growth => &self.growth,
            LongTermStatus::Stable => &self.stable,
            LongTermStatus::Decline => &self.decline,
            LongTermStatus::Crash => &self.crash,
        }
    }

    pub fn get_mut(&mut self, status: LongTermStatus) -> &mut LongTermStatusConfig {
        match status {
            LongTermStatus::Surge => &mut self.surge,
            LongTermStatus::Growth => &mut self.growth,
            LongTermStatus::Stable => &mut self.stable,
            LongTermStatus::Decline => &mut self.decline,
            LongTermStatus::Crash => &mut self.crash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermStatusConfig {
    pub threshold: f64,
    #[serde(default = "default_short_operator")]
    pub operator: Operator,
}

fn default_short_operator() -> Operator {
    Operator::Gte
}

/// Ladder thresholds. `alarm` is residual and has no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermRules {
    pub surge: ShortTermStatusConfig,
    pub stable: ShortTermStatusConfig,
    pub decline: ShortTermStatusConfig,
}

impl ShortTermRules {
    pub fn get(&self, status: ShortTermStatus) -> Option<&ShortTermStatusConfig> {
        match status {
            ShortTermStatus::Surge => Some(&self.surge),
            ShortTermStatus::Stable => Some(&self.stable),
            ShortTermStatus::Decline => Some(&self.decline),
            ShortTermStatus::Alarm => None,
        }
    }
}

/// Single-metric rule consulted only after every primary rule failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub metric: MetricKey,
    pub operator: Operator,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRules {
    pub crash: FallbackRule,
    pub decline: FallbackRule,
    pub surge: FallbackRule,
    pub growth: FallbackRule,
}

impl FallbackRules {
    /// `stable` has no fallback rule; it is the terminal default.
    pub fn get(&self, status: LongTermStatus) -> Option<&FallbackRule> {
        match status {
            LongTermStatus::Crash => Some(&self.crash),
            LongTermStatus::Decline => Some(&self.decline),
            LongTermStatus::Surge => Some(&self.surge),
            LongTermStatus::Growth => Some(&self.growth),
            LongTermStatus::Stable => None,
        }
    }
}

/// Complete, user-editable classification configuration.
///
/// Documents from disk are usually partial; build this type through
/// [`crate::rules::merge::merge_with_defaults`] so every missing field is
/// backfilled. A config without `fallback` classifies with the built-in
/// fallback rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub long: LongTermRules,
    pub short: ShortTermRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackRules>,
}
