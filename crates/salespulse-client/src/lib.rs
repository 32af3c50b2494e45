pub mod commands;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod input;
pub mod intelligence;
pub mod rules;
pub mod state;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use engine::{ClassifiedEntity, EntityRecord, MetricSet, apply_config};
pub use error::{ClientError, ClientResult};
pub use rules::{RulesConfig, default_rules_config, merge_with_defaults};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
