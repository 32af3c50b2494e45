use crate::engine::metrics::{MetricKey, MetricSet};
use crate::engine::status::ShortTermStatus;
use crate::rules::model::ShortTermRules;

/// Walks the short-term ladder top-down on the 2v2 metric.
///
/// The first rung whose comparison holds wins; below every rung the entity
/// is in `alarm`. A rung with a `between` or unrecognized operator is skipped.
pub fn classify_short_term(metrics: &MetricSet, short: &ShortTermRules) -> ShortTermStatus {
    let value = metrics.value(MetricKey::M2v2);
    ShortTermStatus::LADDER
        .into_iter()
        .find(|status| {
            short
                .get(*status)
                .is_some_and(|rung| rung.operator.compare(value, rung.threshold))
        })
        .unwrap_or(ShortTermStatus::Alarm)
}
