//! Consensus blending of profile scores.

use crate::error::{ConfigErrorKind, IpPortError, Result};
use crate::model::ProfileScore;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolved relative weight per profile.
///
/// Weights are applied exactly as held here. Renormalization, when asked
/// for, happens once while the configuration snapshot is built, never per
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusWeights {
    weights: IndexMap<String, f64>,
    renormalized: bool,
}

impl ConsensusWeights {
    /// Validate raw weights against the configured profile names.
    ///
    /// Every profile needs exactly one finite, non-negative weight and no
    /// weight may name an unknown profile.
    pub fn resolve<'a>(
        raw: &IndexMap<String, f64>,
        profile_names: impl IntoIterator<Item = &'a str>,
        renormalize: bool,
    ) -> Result<Self> {
        let names: Vec<&str> = profile_names.into_iter().collect();

        if let Some(unknown) = raw.keys().find(|k| !names.contains(&k.as_str())) {
            return Err(IpPortError::config(
                "consensus weights",
                ConfigErrorKind::UnknownConsensusProfile(unknown.clone()),
            ));
        }

        let mut weights = IndexMap::with_capacity(names.len());
        for name in names {
            let value = *raw.get(name).ok_or_else(|| {
                IpPortError::config(
                    "consensus weights",
                    ConfigErrorKind::MissingConsensusWeight(name.to_string()),
                )
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(IpPortError::config(
                    "consensus weights",
                    ConfigErrorKind::InvalidConsensusWeight {
                        profile: name.to_string(),
                        value,
                    },
                ));
            }
            weights.insert(name.to_string(), value);
        }

        if renormalize {
            let total: f64 = weights.values().sum();
            if total <= 0.0 {
                return Err(IpPortError::config(
                    "consensus weights",
                    ConfigErrorKind::ZeroConsensusTotal,
                ));
            }
            for value in weights.values_mut() {
                *value /= total;
            }
        }

        Ok(Self {
            weights,
            renormalized: renormalize,
        })
    }

    #[must_use]
    pub fn get(&self, profile: &str) -> Option<f64> {
        self.weights.get(profile).copied()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    #[must_use]
    pub const fn is_renormalized(&self) -> bool {
        self.renormalized
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Blends per-profile final scores into one consensus score.
#[derive(Debug, Clone, Copy)]
pub struct ConsensusAggregator<'a> {
    weights: &'a ConsensusWeights,
}

impl<'a> ConsensusAggregator<'a> {
    #[must_use]
    pub const fn new(weights: &'a ConsensusWeights) -> Self {
        Self { weights }
    }

    /// `Σ final_score(p, k) * relative_weight_k`
    ///
    /// Profiles absent from `scores` contribute nothing.
    #[must_use]
    pub fn blend(&self, scores: &IndexMap<String, ProfileScore>) -> f64 {
        self.weights
            .iter()
            .filter_map(|(name, weight)| scores.get(name).map(|s| s.final_score * weight))
            .sum()
    }
}
