//! Portfolio-level views over classified entities.

pub mod alerts;
pub mod policy;
pub mod rankings;
pub mod summary;

pub use alerts::{AlertEntry, AlertReason, select_alerts};
pub use policy::{ALERT_POLICY_V1, ALERT_POLICY_VERSION, AlertPolicy};
pub use rankings::{DEFAULT_RANKING_LIMITS, RankingLimits, Rankings, rank_entities};
pub use summary::{ClassificationSummary, summarize};
