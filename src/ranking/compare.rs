//! Agreement between two rankings of the same patents.

use crate::model::RankedEntry;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Cutoffs reported by default for top-N overlap
pub const DEFAULT_OVERLAP_CUTOFFS: [usize; 5] = [25, 50, 100, 250, 500];

/// Shared membership of the top `cutoff` entries of two rankings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOverlap {
    /// Requested cutoff, clipped to the shorter ranking
    pub cutoff: usize,
    pub shared: usize,
}

impl TopOverlap {
    /// Shared fraction of the cutoff, 0 for an empty cutoff.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.cutoff == 0 {
            0.0
        } else {
            self.shared as f64 / self.cutoff as f64
        }
    }
}

/// Rank agreement between two ranking contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingComparison {
    pub left: String,
    pub right: String,
    /// Patents present in both rankings
    pub common: usize,
    /// Spearman rank correlation over the common patents
    pub spearman: f64,
    pub overlaps: Vec<TopOverlap>,
}

/// Spearman correlation `1 - 6Σd² / (n(n² - 1))` for paired ranks.
///
/// Returns 0 when fewer than two pairs are given.
#[must_use]
pub fn spearman(pairs: &[(usize, usize)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return 0.0;
    }
    let d_sq: f64 = pairs
        .iter()
        .map(|&(a, b)| {
            let d = a as f64 - b as f64;
            d * d
        })
        .sum();
    let n = n as f64;
    1.0 - (6.0 * d_sq) / (n * (n * n - 1.0))
}

/// Number of ids shared by the first `cutoff` entries of both lists.
#[must_use]
pub fn overlap_at(left: &[&str], right: &[&str], cutoff: usize) -> usize {
    let a: HashSet<&str> = left.iter().take(cutoff).copied().collect();
    let b: HashSet<&str> = right.iter().take(cutoff).copied().collect();
    a.intersection(&b).count()
}

impl RankingComparison {
    /// Compare two rankings. Patents present in only one side are ignored
    /// for the correlation and re-ranked away before it is computed.
    #[must_use]
    pub fn between(
        left_label: impl Into<String>,
        left: &[RankedEntry],
        right_label: impl Into<String>,
        right: &[RankedEntry],
        cutoffs: &[usize],
    ) -> Self {
        let right_ids: HashSet<&str> = right.iter().map(RankedEntry::patent_id).collect();
        let left_ids: HashSet<&str> = left.iter().map(RankedEntry::patent_id).collect();

        // Re-rank within the common pool so both sides are permutations of 1..=n.
        let left_common: Vec<&str> = left
            .iter()
            .map(RankedEntry::patent_id)
            .filter(|id| right_ids.contains(id))
            .collect();
        let right_common: Vec<&str> = right
            .iter()
            .map(RankedEntry::patent_id)
            .filter(|id| left_ids.contains(id))
            .collect();

        let right_pos: HashMap<&str, usize> = right_common
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i + 1))
            .collect();
        let pairs: Vec<(usize, usize)> = left_common
            .iter()
            .enumerate()
            .filter_map(|(i, id)| right_pos.get(id).map(|&r| (i + 1, r)))
            .collect();

        let left_all: Vec<&str> = left.iter().map(RankedEntry::patent_id).collect();
        let right_all: Vec<&str> = right.iter().map(RankedEntry::patent_id).collect();
        let longest = left_all.len().min(right_all.len());

        let mut seen = HashSet::new();
        let overlaps = cutoffs
            .iter()
            .map(|&c| c.min(longest))
            .filter(|c| seen.insert(*c))
            .map(|cutoff| TopOverlap {
                cutoff,
                shared: overlap_at(&left_all, &right_all, cutoff),
            })
            .collect();

        Self {
            left: left_label.into(),
            right: right_label.into(),
            common: pairs.len(),
            spearman: spearman(&pairs),
            overlaps,
        }
    }
}
