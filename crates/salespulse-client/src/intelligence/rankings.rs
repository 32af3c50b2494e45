use serde::Serialize;
use serde_json::Value;

use crate::engine::apply::ClassifiedEntity;
use crate::engine::metrics::MetricKey;
use crate::engine::status::{LongTermStatus, ShortTermStatus};

/// How many entities each ranking lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankingLimits {
    /// Length of the sales, growth and stability lists.
    pub top: usize,
    /// Length of the weakest-performers list.
    pub bottom: usize,
}

impl RankingLimits {
    pub fn uniform(limit: usize) -> Self {
        Self {
            top: limit,
            bottom: limit,
        }
    }
}

pub const DEFAULT_RANKING_LIMITS: RankingLimits = RankingLimits { top: 30, bottom: 20 };

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub rank: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub status_long: LongTermStatus,
    pub status_short: ShortTermStatus,
    pub metric_12v12: Option<f64>,
    pub total_sales: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InactiveEntity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status_long: LongTermStatus,
    pub last_active_month: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    pub limits: RankingLimits,
    /// Every entity, highest `total_sales` first.
    pub by_sales: Vec<RankedEntity>,
    /// Active entities, highest 12v12 first.
    pub by_growth: Vec<RankedEntity>,
    /// Active entities, 12v12 closest to zero first.
    pub by_stability: Vec<RankedEntity>,
    /// Active entities, lowest 12v12 first.
    pub bottom: Vec<RankedEntity>,
    /// Inactive entities, most recently active first. Not truncated.
    pub inactive: Vec<InactiveEntity>,
}

/// Builds the ranking views. Missing numbers rank as 0 and ties keep input order.
pub fn rank_entities(classified: &[ClassifiedEntity], limits: RankingLimits) -> Rankings {
    let active = classified
        .iter()
        .filter(|entity| !entity.is_inactive())
        .collect::<Vec<&ClassifiedEntity>>();

    let mut by_sales = classified.iter().collect::<Vec<&ClassifiedEntity>>();
    by_sales.sort_by(|left, right| total_sales(right).total_cmp(&total_sales(left)));

    let mut by_growth = active.clone();
    by_growth.sort_by(|left, right| annual(right).total_cmp(&annual(left)));

    let mut by_stability = active.clone();
    by_stability.sort_by(|left, right| annual(left).abs().total_cmp(&annual(right).abs()));

    let mut bottom = active;
    bottom.sort_by(|left, right| annual(left).total_cmp(&annual(right)));

    let mut inactive = classified
        .iter()
        .filter(|entity| entity.is_inactive())
        .collect::<Vec<&ClassifiedEntity>>();
    inactive.sort_by(|left, right| last_active(right).total_cmp(&last_active(left)));

    Rankings {
        limits,
        by_sales: ranked(by_sales, limits.top),
        by_growth: ranked(by_growth, limits.top),
        by_stability: ranked(by_stability, limits.top),
        bottom: ranked(bottom, limits.bottom),
        inactive: inactive
            .into_iter()
            .map(|entity| InactiveEntity {
                id: entity.id_text(),
                name: entity.entity.name().map(str::to_string),
                status_long: entity.result.status_long,
                last_active_month: entity.entity.attributes.get("last_active_month").cloned(),
            })
            .collect(),
    }
}

fn ranked(entities: Vec<&ClassifiedEntity>, limit: usize) -> Vec<RankedEntity> {
    entities
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, entity)| RankedEntity {
            rank: index + 1,
            id: entity.id_text(),
            name: entity.entity.name().map(str::to_string),
            status_long: entity.result.status_long,
            status_short: entity.result.status_short,
            metric_12v12: entity.entity.metrics.metric_12v12,
            total_sales: entity.entity.attribute_f64("total_sales"),
        })
        .collect()
}

fn annual(entity: &ClassifiedEntity) -> f64 {
    entity.entity.metrics.value(MetricKey::M12v12)
}

fn total_sales(entity: &ClassifiedEntity) -> f64 {
    entity.entity.attribute_f64("total_sales").unwrap_or(0.0)
}

fn last_active(entity: &ClassifiedEntity) -> f64 {
    entity.entity.attribute_f64("last_active_month").unwrap_or(0.0)
}
