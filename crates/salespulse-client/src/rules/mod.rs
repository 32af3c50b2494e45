pub mod defaults;
pub mod merge;
pub mod model;

pub use defaults::default_rules_config;
pub use merge::{ConfigShape, MergedRules, merge_document, merge_with_defaults};
pub use model::RulesConfig;
