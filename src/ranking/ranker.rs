//! Descending-score ranking with a deterministic tie-break.
//!
//! Order is by score descending (`f64::total_cmp`), then by patent id
//! ascending. Ranks are 1-based and contiguous within each context.

use crate::model::{RankedEntry, ScoredPatent};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Which score a ranking context is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankSource {
    Consensus,
    Profile(String),
}

impl RankSource {
    /// Score of a patent under this source. A profile the patent was not
    /// scored under reads as 0.
    #[must_use]
    pub fn score_of(&self, patent: &ScoredPatent) -> f64 {
        match self {
            Self::Consensus => patent.consensus_score,
            Self::Profile(name) => patent.final_score(name).unwrap_or(0.0),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Consensus => "consensus",
            Self::Profile(name) => name,
        }
    }
}

/// Compare two `(id, score)` pairs in rank order.
#[must_use]
pub fn rank_cmp(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Indices of `items` in rank order.
#[must_use]
pub fn rank_order(items: &[(&str, f64)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&i, &j| rank_cmp(items[i], items[j]));
    order
}

/// Builds ranking tables from scored patents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rank every patent by the given source.
    #[must_use]
    pub fn rank(&self, patents: &[ScoredPatent], source: &RankSource) -> Vec<RankedEntry> {
        self.rank_refs(&patents.iter().collect::<Vec<_>>(), source)
    }

    fn rank_refs(&self, patents: &[&ScoredPatent], source: &RankSource) -> Vec<RankedEntry> {
        let keyed: Vec<(&str, f64)> = patents
            .iter()
            .map(|p| (p.patent_id.as_str(), source.score_of(p)))
            .collect();

        rank_order(&keyed)
            .into_iter()
            .enumerate()
            .map(|(position, idx)| RankedEntry {
                rank: position + 1,
                score: keyed[idx].1,
                patent: patents[idx].clone(),
            })
            .collect()
    }

    /// Rank separately within each group. Group keys come from `group_of`,
    /// indexed like `patents`.
    #[must_use]
    pub fn rank_within_groups<F>(
        &self,
        patents: &[ScoredPatent],
        source: &RankSource,
        group_of: F,
    ) -> BTreeMap<String, Vec<RankedEntry>>
    where
        F: Fn(usize, &ScoredPatent) -> String,
    {
        let mut groups: BTreeMap<String, Vec<&ScoredPatent>> = BTreeMap::new();
        for (idx, patent) in patents.iter().enumerate() {
            groups.entry(group_of(idx, patent)).or_default().push(patent);
        }

        groups
            .into_iter()
            .map(|(key, members)| (key, self.rank_refs(&members, source)))
            .collect()
    }
}
