//! Scoring and ranking outputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Score of one patent under one weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileScore {
    /// Weighted sum of normalized metrics
    pub base_score: f64,
    /// Remaining-term multiplier, identical across profiles
    pub year_multiplier: f64,
    /// `base_score * year_multiplier`
    pub final_score: f64,
}

/// A patent scored under every configured profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPatent {
    pub patent_id: String,
    /// Profile name -> score, in configuration order
    pub profiles: IndexMap<String, ProfileScore>,
    pub consensus_score: f64,
}

impl ScoredPatent {
    /// Final score under the named profile.
    #[must_use]
    pub fn final_score(&self, profile: &str) -> Option<f64> {
        self.profiles.get(profile).map(|s| s.final_score)
    }
}

/// A scored patent placed within one ranking context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based, contiguous within its context
    pub rank: usize,
    /// The score this context was ranked by
    pub score: f64,
    #[serde(flatten)]
    pub patent: ScoredPatent,
}

impl RankedEntry {
    #[must_use]
    pub fn patent_id(&self) -> &str {
        &self.patent.patent_id
    }
}
