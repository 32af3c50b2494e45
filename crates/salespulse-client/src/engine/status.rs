use std::fmt;

use serde::{Deserialize, Serialize};

/// Long-term health verdict for a store or product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongTermStatus {
    Surge,
    Growth,
    Stable,
    Decline,
    Crash,
}

impl LongTermStatus {
    /// Order in which primary rules are consulted. Earlier statuses win ties.
    pub const PRIORITY: [LongTermStatus; 5] = [
        Self::Surge,
        Self::Growth,
        Self::Stable,
        Self::Decline,
        Self::Crash,
    ];

    /// Order in which fallback rules are consulted once no primary rule matched.
    ///
    /// This deliberately differs from [`Self::PRIORITY`]: the extremes are
    /// tested before growth, and `stable` has no fallback rule because it is
    /// the terminal default.
    pub const FALLBACK_ORDER: [LongTermStatus; 4] =
        [Self::Crash, Self::Decline, Self::Surge, Self::Growth];

    /// Verdict used when neither primary nor fallback rules match.
    pub const TERMINAL_DEFAULT: LongTermStatus = Self::Stable;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Surge => "surge",
            Self::Growth => "growth",
            Self::Stable => "stable",
            Self::Decline => "decline",
            Self::Crash => "crash",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|status| status.as_str() == value.trim())
    }
}

impl fmt::Display for LongTermStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fast-reacting short-term signal driven by the 2v2 metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortTermStatus {
    Surge,
    Stable,
    Decline,
    Alarm,
}

impl ShortTermStatus {
    /// Configured rungs, checked top-down. `Alarm` is the residual case.
    pub const LADDER: [ShortTermStatus; 3] = [Self::Surge, Self::Stable, Self::Decline];

    pub const ALL: [ShortTermStatus; 4] = [Self::Surge, Self::Stable, Self::Decline, Self::Alarm];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Surge => "surge",
            Self::Stable => "stable",
            Self::Decline => "decline",
            Self::Alarm => "alarm",
        }
    }
}

impl fmt::Display for ShortTermStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
