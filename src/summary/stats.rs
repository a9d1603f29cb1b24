//! Per-group accumulators shared by the summary tables.

use crate::model::PatentRecord;
use serde::{Deserialize, Serialize};

/// Median of a list of ranks: the middle element of the sorted list, or the
/// mean of the two middle elements for an even count. 0 when empty.
#[must_use]
pub fn median(ranks: &[usize]) -> f64 {
    if ranks.is_empty() {
        return 0.0;
    }
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

/// Running rank statistics for one group.
#[derive(Debug, Clone, Default)]
pub struct RankStats {
    ranks: Vec<usize>,
    sum: usize,
    min: Option<usize>,
    max: Option<usize>,
}

impl RankStats {
    pub fn push(&mut self, rank: usize) {
        self.ranks.push(rank);
        self.sum += rank;
        self.min = Some(self.min.map_or(rank, |m| m.min(rank)));
        self.max = Some(self.max.map_or(rank, |m| m.max(rank)));
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        if self.ranks.is_empty() {
            0.0
        } else {
            self.sum as f64 / self.ranks.len() as f64
        }
    }

    #[must_use]
    pub fn min(&self) -> usize {
        self.min.unwrap_or(0)
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.max.unwrap_or(0)
    }

    #[must_use]
    pub fn median(&self) -> f64 {
        median(&self.ranks)
    }
}

/// The patent with the most competitor citations in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCited {
    pub patent_id: String,
    pub title: String,
    pub competitor_citations: f64,
    pub rank: usize,
}

impl TopCited {
    /// Whether `self` beats `other`: more citations, then the better rank.
    fn beats(&self, other: &Self) -> bool {
        match self
            .competitor_citations
            .total_cmp(&other.competitor_citations)
        {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.rank < other.rank,
        }
    }
}

/// Statistics common to every summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    pub avg_rank: f64,
    pub min_rank: usize,
    pub max_rank: usize,
    pub median_rank: f64,
    /// Sum of competitor citations
    pub aggregate_citations: f64,
    pub avg_citations_per_entry: f64,
    /// Sum of forward citations
    pub forward_citations: f64,
}

/// Accumulates one group's patents as they are encountered.
#[derive(Debug, Clone, Default)]
pub struct GroupAccumulator {
    ranks: RankStats,
    citations: f64,
    forward: f64,
    years: f64,
    active: usize,
    top_cited: Option<TopCited>,
    /// (rank, patent id) of every member
    members: Vec<(usize, String)>,
}

impl GroupAccumulator {
    pub fn add(&mut self, record: &PatentRecord, rank: usize, active_threshold: f64) {
        self.ranks.push(rank);
        self.citations += record.competitor_citations;
        self.forward += record.forward_citations;
        self.years += record.years_remaining;
        if record.is_active(active_threshold) {
            self.active += 1;
        }
        self.members.push((rank, record.patent_id.clone()));

        let candidate = TopCited {
            patent_id: record.patent_id.clone(),
            title: record.title.clone(),
            competitor_citations: record.competitor_citations,
            rank,
        };
        if self
            .top_cited
            .as_ref()
            .is_none_or(|current| candidate.beats(current))
        {
            self.top_cited = Some(candidate);
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ranks.count()
    }

    #[must_use]
    pub fn stats(&self) -> GroupStats {
        let count = self.count();
        GroupStats {
            count,
            avg_rank: self.ranks.average(),
            min_rank: self.ranks.min(),
            max_rank: self.ranks.max(),
            median_rank: self.ranks.median(),
            aggregate_citations: self.citations,
            avg_citations_per_entry: per_entry(self.citations, count),
            forward_citations: self.forward,
        }
    }

    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn avg_years_remaining(&self) -> f64 {
        per_entry(self.years, self.count())
    }

    #[must_use]
    pub fn top_cited(&self) -> Option<TopCited> {
        self.top_cited.clone()
    }

    /// Ids of the `n` best-ranked members.
    #[must_use]
    pub fn best_ranked(&self, n: usize) -> Vec<String> {
        let mut members: Vec<&(usize, String)> = self.members.iter().collect();
        members.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        members.into_iter().take(n).map(|(_, id)| id.clone()).collect()
    }
}

fn per_entry(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
