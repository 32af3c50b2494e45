use serde::Serialize;

use crate::engine::apply::ClassifiedEntity;
use crate::engine::status::{LongTermStatus, ShortTermStatus};
use crate::intelligence::alerts::select_alerts;
use crate::intelligence::policy::{ALERT_POLICY_V1, ALERT_POLICY_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub entities: usize,
    pub active: usize,
    pub inactive: usize,
    pub fallback: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub totals: SummaryTotals,
    pub long_term: Vec<StatusCount<LongTermStatus>>,
    pub short_term: Vec<StatusCount<ShortTermStatus>>,
    pub alert_count: usize,
    pub alert_policy_version: String,
}

impl ClassificationSummary {
    /// Share of entities classified through fallback or the terminal default.
    pub fn fallback_share(&self) -> f64 {
        if self.totals.entities == 0 {
            return 0.0;
        }
        self.totals.fallback as f64 / self.totals.entities as f64
    }
}

/// Status distribution across all entities. Every label is listed, in its
/// fixed order, even when its count is zero.
pub fn summarize(classified: &[ClassifiedEntity]) -> ClassificationSummary {
    let inactive = classified
        .iter()
        .filter(|entity| entity.is_inactive())
        .count();
    let fallback = classified
        .iter()
        .filter(|entity| entity.result.is_fallback)
        .count();

    let long_term = LongTermStatus::PRIORITY
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: classified
                .iter()
                .filter(|entity| entity.result.status_long == status)
                .count(),
        })
        .collect();

    let short_term = ShortTermStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: classified
                .iter()
                .filter(|entity| entity.result.status_short == status)
                .count(),
        })
        .collect();

    ClassificationSummary {
        totals: SummaryTotals {
            entities: classified.len(),
            active: classified.len() - inactive,
            inactive,
            fallback,
        },
        long_term,
        short_term,
        alert_count: select_alerts(classified, ALERT_POLICY_V1).len(),
        alert_policy_version: ALERT_POLICY_VERSION.to_string(),
    }
}
