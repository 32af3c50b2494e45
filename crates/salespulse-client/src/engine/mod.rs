//! Pure classification engine. Nothing in here performs I/O or logs.

pub mod apply;
pub mod condition;
pub mod long_term;
pub mod metrics;
pub mod rule;
pub mod short_term;
pub mod status;

pub use apply::{ClassificationResult, ClassifiedEntity, apply_config, classify_entity};
pub use long_term::{LongTermOutcome, MetricComparisonRow, RuleIndex, classify_long_term};
pub use metrics::{EntityRecord, MetricKey, MetricSet};
pub use short_term::classify_short_term;
pub use status::{LongTermStatus, ShortTermStatus};
