//! Built-in profiles, consensus weights and named presets.

use super::types::{ConsensusConfig, EngineConfig, SummaryConfig, WeightProfileConfig};
use crate::scoring::{WeightSlots, METRIC_COUNT};
use crate::summary::builtin_aliases;
use indexmap::IndexMap;

// ============================================================================
// Default Values
// ============================================================================

/// Default number of best-ranked patents listed per competitor
pub const DEFAULT_TOP_N: usize = 5;

/// Default remaining-term threshold for an "active" patent, in years
pub const DEFAULT_ACTIVE_YEARS: f64 = 3.0;

/// Default number of sub-sectors listed per super-sector
pub const DEFAULT_TOP_SUB_SECTORS: usize = 3;

/// Reference profiles. Weight order: competitor citations, competitor count,
/// forward citations, eligibility, validity, claim breadth, enforcement
/// clarity, design-around difficulty, IPR risk, prosecution quality.
const BUILTIN_PROFILES: [(&str, &str, [f64; METRIC_COUNT]); 6] = [
    (
        "ip-lit-aggressive",
        "Litigation counsel seeking near-term assertion targets",
        [0.25, 0.15, 0.10, 0.05, 0.05, 0.10, 0.15, 0.10, 0.03, 0.02],
    ),
    (
        "ip-lit-balanced",
        "Litigation counsel weighing reach against survivability",
        [0.20, 0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.05, 0.05],
    ),
    (
        "ip-lit-conservative",
        "Litigation counsel prioritizing validity and IPR resilience",
        [0.10, 0.05, 0.05, 0.15, 0.20, 0.05, 0.10, 0.05, 0.15, 0.10],
    ),
    (
        "licensing",
        "Licensing program focused on breadth of adoption",
        [0.15, 0.20, 0.20, 0.05, 0.10, 0.10, 0.05, 0.10, 0.03, 0.02],
    ),
    (
        "corporate-ma",
        "Corporate development valuing the portfolio as an asset",
        [0.10, 0.10, 0.20, 0.10, 0.10, 0.10, 0.05, 0.10, 0.10, 0.05],
    ),
    (
        "executive",
        "Executive overview across all signals",
        [0.15, 0.15, 0.15, 0.10, 0.10, 0.10, 0.05, 0.10, 0.05, 0.05],
    ),
];

/// The six reference weight profiles.
#[must_use]
pub fn default_profiles() -> Vec<WeightProfileConfig> {
    BUILTIN_PROFILES
        .iter()
        .map(|(name, description, weights)| WeightProfileConfig {
            name: (*name).to_string(),
            description: Some((*description).to_string()),
            weights: WeightSlots::from_array(*weights),
        })
        .collect()
}

fn consensus_map(weights: [f64; 6]) -> IndexMap<String, f64> {
    BUILTIN_PROFILES
        .iter()
        .zip(weights)
        .map(|((name, _, _), w)| ((*name).to_string(), w))
        .collect()
}

/// Default relative consensus weights, summing to 1.
#[must_use]
pub fn default_consensus_weights() -> IndexMap<String, f64> {
    consensus_map([0.15, 0.20, 0.15, 0.20, 0.15, 0.15])
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            consensus: ConsensusConfig::default(),
            affiliates: builtin_aliases(),
            summary: SummaryConfig::default(),
        }
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            weights: default_consensus_weights(),
            renormalize: false,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            active_years_threshold: DEFAULT_ACTIVE_YEARS,
            top_sub_sectors: DEFAULT_TOP_SUB_SECTORS,
            rank_by: None,
        }
    }
}

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets. Presets only change consensus weights; the
/// six reference profiles stay as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Reference consensus weights
    Default,
    /// Consensus led by the three litigation postures
    Litigation,
    /// Consensus led by the licensing posture
    Licensing,
    /// Every profile weighted equally
    EqualConsensus,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Litigation => "litigation",
            Self::Licensing => "licensing",
            Self::EqualConsensus => "equal-consensus",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "reference" => Some(Self::Default),
            "litigation" | "lit" => Some(Self::Litigation),
            "licensing" => Some(Self::Licensing),
            "equal-consensus" | "equal" => Some(Self::EqualConsensus),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Reference consensus weights across all six postures",
            Self::Litigation => "Consensus weighted toward assertion and litigation value",
            Self::Licensing => "Consensus weighted toward licensing program value",
            Self::EqualConsensus => "Every profile contributes equally to consensus",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Default,
            Self::Litigation,
            Self::Licensing,
            Self::EqualConsensus,
        ]
    }

    fn consensus_weights(self) -> IndexMap<String, f64> {
        match self {
            Self::Default => default_consensus_weights(),
            Self::Litigation => consensus_map([0.25, 0.25, 0.20, 0.10, 0.10, 0.10]),
            Self::Licensing => consensus_map([0.10, 0.15, 0.10, 0.35, 0.15, 0.15]),
            Self::EqualConsensus => consensus_map([1.0 / 6.0; 6]),
        }
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl EngineConfig {
    /// Create an `EngineConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        Self {
            consensus: ConsensusConfig {
                weights: preset.consensus_weights(),
                renormalize: false,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightVector;

    #[test]
    fn test_builtin_profiles_sum_to_one() {
        for profile in default_profiles() {
            let vector = WeightVector::from_slots(&profile.name, &profile.weights)
                .expect("built-in profile is complete");
            assert!(
                (vector.sum() - 1.0).abs() < 1e-9,
                "{} sums to {}",
                profile.name,
                vector.sum()
            );
        }
    }

    #[test]
    fn test_preset_consensus_sums_to_one() {
        for preset in ConfigPreset::all() {
            let config = EngineConfig::from_preset(*preset);
            let total: f64 = config.consensus.weights.values().sum();
            assert!((total - 1.0).abs() < 1e-9, "{preset} sums to {total}");
            assert_eq!(config.consensus.weights.len(), config.profiles.len());
        }
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ConfigPreset::from_name("LIT"), Some(ConfigPreset::Litigation));
        assert_eq!(
            ConfigPreset::from_name("equal"),
            Some(ConfigPreset::EqualConsensus)
        );
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_default_summary_options() {
        let summary = SummaryConfig::default();
        assert_eq!(summary.top_n, 5);
        assert_eq!(summary.top_sub_sectors, 3);
        assert_eq!(summary.active_years_threshold, 3.0);
        assert!(summary.rank_by.is_none());
    }
}
