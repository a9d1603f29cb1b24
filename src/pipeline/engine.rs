//! One complete scoring run.

use super::sanitize::{sanitize, DataQualityIssue};
use crate::config::{ConfigSnapshot, EngineConfig, SummaryConfig};
use crate::error::Result;
use crate::model::{PatentRecord, RankedEntry, ScoredPatent};
use crate::ranking::{
    RankSource, Ranker, RankingComparison, ScoreDistribution, DEFAULT_OVERLAP_CUTOFFS,
};
use crate::scoring::{ConsensusAggregator, ConsensusWeights, Scorer, WeightProfile};
use crate::summary::{sector_key, AffiliateResolver, SummaryBuilder, SummaryTables};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Label of the consensus column in rankings, distributions and comparisons
pub const CONSENSUS: &str = "consensus";

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct EngineResults {
    pub generated_at: DateTime<Utc>,
    pub config_fingerprint: String,
    /// Records scored, after the data-quality pass
    pub record_count: usize,
    pub profiles: Vec<String>,
    pub scored: Vec<ScoredPatent>,
    pub profile_rankings: IndexMap<String, Vec<RankedEntry>>,
    pub consensus_ranking: Vec<RankedEntry>,
    /// Sector -> consensus ranking within that sector
    pub sector_rankings: BTreeMap<String, Vec<RankedEntry>>,
    pub summaries: SummaryTables,
    /// Each profile ranking against the consensus ranking
    pub comparisons: Vec<RankingComparison>,
    /// Score column -> distribution
    pub distributions: IndexMap<String, ScoreDistribution>,
    pub data_quality: Vec<DataQualityIssue>,
    /// Sanitized input, kept for presentation
    #[serde(skip)]
    pub records: Vec<PatentRecord>,
}

impl EngineResults {
    /// The ranking for a column: `consensus` or a profile name.
    #[must_use]
    pub fn ranking(&self, column: &str) -> Option<&[RankedEntry]> {
        if column == CONSENSUS {
            Some(&self.consensus_ranking)
        } else {
            self.profile_rankings.get(column).map(Vec::as_slice)
        }
    }

    /// Index of sanitized records by patent id.
    #[must_use]
    pub fn record_index(&self) -> HashMap<&str, &PatentRecord> {
        self.records
            .iter()
            .map(|r| (r.patent_id.as_str(), r))
            .collect()
    }

    /// Comparison between two ranking columns, computed on demand.
    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> Option<RankingComparison> {
        Some(RankingComparison::between(
            left,
            self.ranking(left)?,
            right,
            self.ranking(right)?,
            &DEFAULT_OVERLAP_CUTOFFS,
        ))
    }
}

/// Runs the scoring pipeline against a frozen configuration.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    snapshot: ConfigSnapshot,
}

impl ScoringEngine {
    #[must_use]
    pub const fn new(snapshot: ConfigSnapshot) -> Self {
        Self { snapshot }
    }

    /// Validate a configuration and build an engine from it.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(config.snapshot()?))
    }

    #[must_use]
    pub const fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    /// Score, rank and summarize one record batch.
    ///
    /// The batch replaces any earlier one; nothing carries over between calls.
    #[must_use]
    pub fn compute(&self, records: Vec<PatentRecord>) -> EngineResults {
        let snapshot = &self.snapshot;
        let input_count = records.len();
        let sanitized = sanitize(records);
        let records = sanitized.records;

        tracing::info!(
            records = records.len(),
            dropped = input_count - records.len(),
            profiles = snapshot.profiles.len(),
            "scoring batch"
        );

        let scorer = Scorer::new(&snapshot.profiles);
        let aggregator = ConsensusAggregator::new(&snapshot.consensus);
        let scored: Vec<ScoredPatent> = records
            .iter()
            .map(|record| {
                let profiles = scorer.score(record);
                ScoredPatent {
                    patent_id: record.patent_id.clone(),
                    consensus_score: aggregator.blend(&profiles),
                    profiles,
                }
            })
            .collect();
        tracing::debug!(scored = scored.len(), "scoring complete");

        let ranker = Ranker::new();
        let consensus_ranking = ranker.rank(&scored, &RankSource::Consensus);
        let profile_rankings: IndexMap<String, Vec<RankedEntry>> = snapshot
            .profiles
            .iter()
            .map(|p| {
                let source = RankSource::Profile(p.name.clone());
                (p.name.clone(), ranker.rank(&scored, &source))
            })
            .collect();
        let sector_rankings = ranker.rank_within_groups(&scored, &RankSource::Consensus, |idx, _| {
            sector_key(&records[idx]).to_string()
        });
        tracing::debug!(sectors = sector_rankings.len(), "rankings complete");

        let summary_ranking = match &snapshot.rank_source {
            RankSource::Consensus => consensus_ranking.as_slice(),
            RankSource::Profile(name) => profile_rankings
                .get(name)
                .map_or(consensus_ranking.as_slice(), Vec::as_slice),
        };
        let summaries = SummaryBuilder::new(&snapshot.summary, &snapshot.affiliates).build(
            snapshot.rank_source.label(),
            &records,
            summary_ranking,
        );
        tracing::debug!(
            competitors = summaries.competitors.len(),
            affiliates = summaries.affiliates.len(),
            sectors = summaries.sectors.len(),
            super_sectors = summaries.super_sectors.len(),
            "summaries complete"
        );

        let comparisons = if scored.is_empty() {
            Vec::new()
        } else {
            profile_rankings
                .iter()
                .map(|(name, ranking)| {
                    RankingComparison::between(
                        name.as_str(),
                        ranking,
                        CONSENSUS,
                        &consensus_ranking,
                        &DEFAULT_OVERLAP_CUTOFFS,
                    )
                })
                .collect()
        };

        let mut distributions = IndexMap::new();
        if let Some(d) = ScoreDistribution::from_ranked(&consensus_ranking) {
            distributions.insert(CONSENSUS.to_string(), d);
        }
        for (name, ranking) in &profile_rankings {
            if let Some(d) = ScoreDistribution::from_ranked(ranking) {
                distributions.insert(name.clone(), d);
            }
        }

        tracing::info!(
            issues = sanitized.issues.len(),
            fingerprint = %snapshot.fingerprint,
            "run complete"
        );

        EngineResults {
            generated_at: Utc::now(),
            config_fingerprint: snapshot.fingerprint.clone(),
            record_count: records.len(),
            profiles: snapshot.profiles.iter().map(|p| p.name.clone()).collect(),
            scored,
            profile_rankings,
            consensus_ranking,
            sector_rankings,
            summaries,
            comparisons,
            distributions,
            data_quality: sanitized.issues,
            records,
        }
    }
}

/// Score a batch with explicit profiles and consensus weights, using the
/// built-in affiliate aliases and default summary options.
///
/// Fails only when the profiles and consensus weights do not fit together.
pub fn compute(
    records: Vec<PatentRecord>,
    profiles: &[WeightProfile],
    consensus: &ConsensusWeights,
) -> Result<EngineResults> {
    let snapshot = ConfigSnapshot::from_parts(
        profiles.to_vec(),
        consensus.clone(),
        AffiliateResolver::with_builtins(),
        SummaryConfig::default(),
    )?;
    Ok(ScoringEngine::new(snapshot).compute(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, citations: f64, years: f64, sector: &str) -> PatentRecord {
        let mut r = PatentRecord::new(id);
        r.competitor_citations = citations;
        r.competitor_count = citations / 3.0;
        r.forward_citations = citations * 4.0;
        r.years_remaining = years;
        r.sector = sector.to_string();
        r.assignee = "Broadcom Inc.".to_string();
        r.competitor_names = vec!["Cisco".to_string()];
        r
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::from_config(&EngineConfig::default()).expect("defaults are valid")
    }

    #[test]
    fn empty_batch_gives_empty_outputs() {
        let results = engine().compute(Vec::new());
        assert_eq!(results.record_count, 0);
        assert!(results.scored.is_empty());
        assert!(results.consensus_ranking.is_empty());
        assert!(results.profile_rankings.values().all(Vec::is_empty));
        assert!(results.sector_rankings.is_empty());
        assert!(results.summaries.is_empty());
        assert!(results.comparisons.is_empty());
        assert!(results.distributions.is_empty());
    }

    #[test]
    fn full_run_ranks_and_summarizes() {
        let records = vec![
            record("US1", 3.0, 2.0, "video-codec"),
            record("US2", 30.0, 15.0, "video-codec"),
            record("US3", 12.0, 8.0, "network-threat-detection"),
        ];
        let results = engine().compute(records);

        assert_eq!(results.record_count, 3);
        let order: Vec<&str> = results
            .consensus_ranking
            .iter()
            .map(RankedEntry::patent_id)
            .collect();
        assert_eq!(order, vec!["US2", "US3", "US1"]);
        assert_eq!(results.profile_rankings.len(), 6);
        assert_eq!(results.comparisons.len(), 6);
        assert_eq!(results.distributions.len(), 7);
        assert_eq!(results.sector_rankings["video-codec"][0].patent_id(), "US2");
        assert_eq!(results.sector_rankings["video-codec"][1].rank, 2);

        assert_eq!(results.summaries.rank_source, CONSENSUS);
        assert_eq!(results.summaries.affiliates.len(), 1);
        assert_eq!(results.summaries.competitors[0].stats.count, 3);
        assert_eq!(results.summaries.super_sectors.len(), 2);
    }

    #[test]
    fn consensus_is_weighted_sum_of_finals() {
        let results = engine().compute(vec![record("US1", 7.0, 6.0, "cloud")]);
        let snapshot = engine().snapshot().clone();
        let patent = &results.scored[0];
        let expected: f64 = snapshot
            .consensus
            .iter()
            .map(|(name, w)| patent.final_score(name).unwrap_or_default() * w)
            .sum();
        assert!((patent.consensus_score - expected).abs() < 1e-12);
    }

    #[test]
    fn summaries_follow_configured_rank_source() {
        let mut config = EngineConfig::default();
        config.summary.rank_by = Some("licensing".to_string());
        let engine = ScoringEngine::from_config(&config).expect("valid");
        let results = engine.compute(vec![record("US1", 5.0, 5.0, "cloud")]);
        assert_eq!(results.summaries.rank_source, "licensing");
    }

    #[test]
    fn compute_with_explicit_parts() {
        let profiles = vec![
            WeightProfile::from_array("a", [0.1; 10]).expect("valid"),
            WeightProfile::from_array("b", [0.2; 10]).expect("valid"),
        ];
        let raw: IndexMap<String, f64> =
            [("a".to_string(), 0.5), ("b".to_string(), 0.5)].into_iter().collect();
        let consensus =
            ConsensusWeights::resolve(&raw, profiles.iter().map(|p| p.name.as_str()), false)
                .expect("valid");

        let results = compute(vec![record("US1", 1.0, 1.0, "x")], &profiles, &consensus)
            .expect("parts fit");
        assert_eq!(results.profiles, vec!["a", "b"]);

        let mismatched = ConsensusWeights::resolve(&raw, ["a", "b"], false).expect("valid");
        assert!(compute(Vec::new(), &profiles[..1], &mismatched).is_err());
    }
}
