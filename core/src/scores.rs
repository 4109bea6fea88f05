use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Name and time shown for a tier nobody has beaten yet.
pub const DEFAULT_SCORE_NAME: &str = "Unknown";
pub const DEFAULT_SCORE_SECS: u32 = 999;

/// Best-time storage the host provides, keyed by [`Tier`].
pub trait ScoreStore {
    /// Best time for `tier`, `None` when the tier is not ranked.
    fn best_time(&self, tier: Tier) -> Option<u32>;

    fn record_score(&mut self, tier: Tier, name: &str, seconds: u32);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub seconds: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCORE_NAME.to_string(),
            seconds: DEFAULT_SCORE_SECS,
        }
    }
}

/// In-memory score table; serializable so the host can persist it however it likes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    scores: BTreeMap<Tier, Score>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            scores: Tier::RANKED
                .into_iter()
                .map(|tier| (tier, Score::default()))
                .collect(),
        }
    }
}

impl HighScores {
    pub fn get(&self, tier: Tier) -> Option<&Score> {
        self.scores.get(&tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &Score)> {
        self.scores.iter().map(|(&tier, score)| (tier, score))
    }

    /// Puts back the default entry for every ranked tier.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ScoreStore for HighScores {
    fn best_time(&self, tier: Tier) -> Option<u32> {
        if !tier.is_ranked() {
            return None;
        }
        Some(self.get(tier).map_or(DEFAULT_SCORE_SECS, |score| score.seconds))
    }

    fn record_score(&mut self, tier: Tier, name: &str, seconds: u32) {
        if !tier.is_ranked() {
            log::debug!("Ignoring {}s score on unranked tier", seconds);
            return;
        }
        log::debug!("New best time on {}: {} by {}", tier, seconds, name);
        self.scores.insert(
            tier,
            Score {
                name: name.to_string(),
                seconds,
            },
        );
    }
}
