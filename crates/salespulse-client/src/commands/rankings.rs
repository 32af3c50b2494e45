use std::path::Path;

use crate::commands::common::{InputOptions, classify_input};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RankingsData;
use crate::intelligence::rankings::{DEFAULT_RANKING_LIMITS, RankingLimits, rank_entities};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default, Clone)]
pub struct RankingsRunOptions<'a> {
    pub input: InputOptions<'a>,
    /// Overrides every list length; defaults to [`DEFAULT_RANKING_LIMITS`].
    pub limit: Option<usize>,
}

pub fn run(path: &str, rules_path: Option<&Path>, limit: Option<usize>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RankingsRunOptions {
        input: InputOptions::new(path, rules_path),
        limit,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RankingsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let limits = match options.limit {
        Some(0) => {
            return Err(ClientError::invalid_argument_for_command(
                "`--limit` must be at least 1.",
                Some("rankings"),
            ));
        }
        Some(limit) => RankingLimits::uniform(limit),
        None => DEFAULT_RANKING_LIMITS,
    };
    let run = classify_input(&options.input)?;

    success(
        "rankings",
        RankingsData {
            rules: run.rules,
            rankings: rank_entities(&run.classified, limits),
        },
    )
}
