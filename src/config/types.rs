//! Configuration types for scoring runs.

use crate::scoring::WeightSlots;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Engine Configuration
// ============================================================================

/// Complete engine configuration as loaded from file or built in code.
///
/// Sections a config file leaves out keep their built-in defaults; sections
/// it sets replace the defaults wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// Stakeholder weight profiles, scored in this order
    pub profiles: Vec<WeightProfileConfig>,
    /// Relative weight of each profile in the consensus score
    pub consensus: ConsensusConfig,
    /// Canonical affiliate name -> raw assignee aliases
    pub affiliates: IndexMap<String, Vec<String>>,
    /// Grouped summary options
    pub summary: SummaryConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Names of the configured profiles, in order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&WeightProfileConfig> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// One weight profile as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeightProfileConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One weight per metric; all ten are required
    pub weights: WeightSlots,
}

/// Consensus blending options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Profile name -> relative weight
    pub weights: IndexMap<String, f64>,
    /// Scale weights to sum to 1 before blending (default: apply as given)
    pub renormalize: bool,
}

/// Options for the grouped summary tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SummaryConfig {
    /// Best-ranked patent ids listed per competitor
    pub top_n: usize,
    /// Minimum remaining years for a patent to count as active
    pub active_years_threshold: f64,
    /// Sub-sectors listed per super-sector
    pub top_sub_sectors: usize,
    /// Profile whose ranking feeds the summaries (consensus when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_by: Option<String>,
}

// ============================================================================
// Builder for EngineConfig
// ============================================================================

/// Builder for constructing `EngineConfig` with a fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Start from a named preset instead of the defaults.
    pub fn preset(mut self, preset: super::ConfigPreset) -> Self {
        self.config = EngineConfig::from_preset(preset);
        self
    }

    /// Replace all profiles.
    pub fn profiles(mut self, profiles: Vec<WeightProfileConfig>) -> Self {
        self.config.profiles = profiles;
        self
    }

    /// Add or replace one profile by name.
    pub fn profile(mut self, profile: WeightProfileConfig) -> Self {
        match self.config.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.config.profiles.push(profile),
        }
        self
    }

    /// Replace all consensus weights.
    pub fn consensus_weights(mut self, weights: IndexMap<String, f64>) -> Self {
        self.config.consensus.weights = weights;
        self
    }

    pub fn consensus_weight(mut self, profile: impl Into<String>, weight: f64) -> Self {
        self.config.consensus.weights.insert(profile.into(), weight);
        self
    }

    pub const fn renormalize(mut self, renormalize: bool) -> Self {
        self.config.consensus.renormalize = renormalize;
        self
    }

    pub fn affiliate(mut self, canonical: impl Into<String>, aliases: &[&str]) -> Self {
        self.config.affiliates.insert(
            canonical.into(),
            aliases.iter().map(|a| (*a).to_string()).collect(),
        );
        self
    }

    pub const fn top_n(mut self, top_n: usize) -> Self {
        self.config.summary.top_n = top_n;
        self
    }

    pub const fn active_years_threshold(mut self, years: f64) -> Self {
        self.config.summary.active_years_threshold = years;
        self
    }

    pub fn rank_by(mut self, profile: Option<String>) -> Self {
        self.config.summary.rank_by = profile;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
