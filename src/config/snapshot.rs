//! Frozen, fully resolved configuration for one run.

use super::types::{EngineConfig, SummaryConfig};
use super::validation::Validatable;
use crate::error::{ConfigErrorKind, IpPortError, Result};
use crate::ranking::RankSource;
use crate::scoring::{ConsensusWeights, WeightProfile, WeightVector};
use crate::summary::AffiliateResolver;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

/// Everything a run reads from configuration, validated and resolved.
///
/// A snapshot never changes once built; editing configuration means building
/// a new one.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub profiles: Vec<WeightProfile>,
    pub consensus: ConsensusWeights,
    pub affiliates: AffiliateResolver,
    pub summary: SummaryConfig,
    /// Ranking the summary tables are built from
    pub rank_source: RankSource,
    /// Hex xxh3 digest of the resolved values
    pub fingerprint: String,
}

impl EngineConfig {
    /// Validate and freeze this configuration.
    ///
    /// Fails on the first malformed element; an incomplete weight vector is
    /// never padded.
    pub fn snapshot(&self) -> Result<ConfigSnapshot> {
        if self.profiles.is_empty() {
            return Err(IpPortError::config("profiles", ConfigErrorKind::NoProfiles));
        }

        let mut profiles = Vec::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            profiles.push(WeightProfile {
                name: profile.name.clone(),
                description: profile.description.clone(),
                weights: WeightVector::from_slots(&profile.name, &profile.weights)?,
            });
        }

        let consensus = ConsensusWeights::resolve(
            &self.consensus.weights,
            self.profile_names(),
            self.consensus.renormalize,
        )?;

        ConfigSnapshot::from_parts(
            profiles,
            consensus,
            AffiliateResolver::from_table(&self.affiliates),
            self.summary.clone(),
        )
    }
}

impl ConfigSnapshot {
    /// Assemble a snapshot from already resolved parts.
    ///
    /// Checks that profile names are unique, that the consensus weights cover
    /// exactly the given profiles, and that the summary options are usable.
    pub fn from_parts(
        profiles: Vec<WeightProfile>,
        consensus: ConsensusWeights,
        affiliates: AffiliateResolver,
        summary: SummaryConfig,
    ) -> Result<Self> {
        if profiles.is_empty() {
            return Err(IpPortError::config("profiles", ConfigErrorKind::NoProfiles));
        }

        let mut names = HashSet::new();
        for profile in &profiles {
            if !names.insert(profile.name.as_str()) {
                return Err(IpPortError::config(
                    "profiles",
                    ConfigErrorKind::DuplicateProfile(profile.name.clone()),
                ));
            }
            if consensus.get(&profile.name).is_none() {
                return Err(IpPortError::config(
                    "consensus weights",
                    ConfigErrorKind::MissingConsensusWeight(profile.name.clone()),
                ));
            }
        }
        if let Some((unknown, _)) = consensus.iter().find(|(name, _)| !names.contains(name)) {
            return Err(IpPortError::config(
                "consensus weights",
                ConfigErrorKind::UnknownConsensusProfile(unknown.to_string()),
            ));
        }

        if let Some(error) = summary.validate().into_iter().next() {
            return Err(IpPortError::config(
                "summary",
                ConfigErrorKind::Invalid {
                    field: error.field,
                    message: error.message,
                },
            ));
        }

        let rank_source = match &summary.rank_by {
            None => RankSource::Consensus,
            Some(name) if names.contains(name.as_str()) => RankSource::Profile(name.clone()),
            Some(name) => {
                return Err(IpPortError::config(
                    "summary.rank_by",
                    ConfigErrorKind::UnknownRankSource(name.clone()),
                ))
            }
        };

        let fingerprint = fingerprint(&profiles, &consensus, &affiliates, &summary);
        tracing::debug!(
            profiles = profiles.len(),
            fingerprint = %fingerprint,
            "configuration snapshot built"
        );

        Ok(Self {
            profiles,
            consensus,
            affiliates,
            summary,
            rank_source,
            fingerprint,
        })
    }

    #[must_use]
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}

fn fingerprint(
    profiles: &[WeightProfile],
    consensus: &ConsensusWeights,
    affiliates: &AffiliateResolver,
    summary: &SummaryConfig,
) -> String {
    let mut hasher_input: Vec<u8> = Vec::new();

    for profile in profiles {
        hasher_input.extend(profile.name.as_bytes());
        hasher_input.push(0);
        for weight in profile.weights.as_array() {
            hasher_input.extend(weight.to_le_bytes());
        }
    }

    for (name, weight) in consensus.iter() {
        hasher_input.extend(name.as_bytes());
        hasher_input.push(0);
        hasher_input.extend(weight.to_le_bytes());
    }

    for (canonical, aliases) in affiliates.table() {
        hasher_input.extend(canonical.as_bytes());
        hasher_input.push(0);
        for alias in aliases {
            hasher_input.extend(alias.as_bytes());
            hasher_input.push(0);
        }
    }

    hasher_input.extend((summary.top_n as u64).to_le_bytes());
    hasher_input.extend(summary.active_years_threshold.to_le_bytes());
    hasher_input.extend((summary.top_sub_sectors as u64).to_le_bytes());
    if let Some(rank_by) = &summary.rank_by {
        hasher_input.extend(rank_by.as_bytes());
    }

    format!("{:016x}", xxh3_64(&hasher_input))
}
