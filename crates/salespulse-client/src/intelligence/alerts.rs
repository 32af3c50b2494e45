use serde::Serialize;

use crate::engine::apply::ClassifiedEntity;
use crate::engine::metrics::MetricKey;
use crate::engine::status::{LongTermStatus, ShortTermStatus};
use crate::intelligence::policy::AlertPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    CrashStatus,
    DecliningStreak,
    SteepAnnualDrop,
}

impl AlertReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrashStatus => "crash_status",
            Self::DecliningStreak => "declining_streak",
            Self::SteepAnnualDrop => "steep_annual_drop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status_long: LongTermStatus,
    pub status_short: ShortTermStatus,
    pub metric_12v12: Option<f64>,
    pub declining_months: Option<f64>,
    pub reasons: Vec<AlertReason>,
}

/// Active entities that need attention, worst annual change first.
///
/// Ties keep input order.
pub fn select_alerts(classified: &[ClassifiedEntity], policy: AlertPolicy) -> Vec<AlertEntry> {
    let mut alerts = classified
        .iter()
        .filter(|entity| !entity.is_inactive())
        .filter_map(|entity| alert_for(entity, policy))
        .collect::<Vec<AlertEntry>>();

    alerts.sort_by(|left, right| {
        let left_value = left.metric_12v12.unwrap_or(0.0);
        let right_value = right.metric_12v12.unwrap_or(0.0);
        left_value.total_cmp(&right_value)
    });
    alerts
}

fn alert_for(entity: &ClassifiedEntity, policy: AlertPolicy) -> Option<AlertEntry> {
    let declining_months = entity.entity.attribute_f64("declining_months");
    let annual = entity.entity.metrics.value(MetricKey::M12v12);

    let mut reasons = Vec::new();
    if policy.is_alert_status(entity.result.status_long) {
        reasons.push(AlertReason::CrashStatus);
    }
    if policy.is_declining_streak(declining_months) {
        reasons.push(AlertReason::DecliningStreak);
    }
    if policy.is_steep_drop(annual) {
        reasons.push(AlertReason::SteepAnnualDrop);
    }
    if reasons.is_empty() {
        return None;
    }

    Some(AlertEntry {
        id: entity.id_text(),
        name: entity.entity.name().map(str::to_string),
        status_long: entity.result.status_long,
        status_short: entity.result.status_short,
        metric_12v12: entity.entity.metrics.metric_12v12,
        declining_months,
        reasons,
    })
}
