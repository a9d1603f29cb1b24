//! Score distribution statistics for a ranked table.

use crate::model::RankedEntry;
use serde::{Deserialize, Serialize};

/// Spread of scores within one ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub count: usize,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub median: f64,
    /// Score at the top-10% cutoff (the entry ranked `ceil(n / 10)`)
    pub p90: f64,
}

impl ScoreDistribution {
    /// Summarize a ranking in rank order. `None` for an empty ranking.
    #[must_use]
    pub fn from_ranked(entries: &[RankedEntry]) -> Option<Self> {
        let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
        Self::from_descending(&scores)
    }

    /// Summarize scores already sorted descending.
    #[must_use]
    pub fn from_descending(scores: &[f64]) -> Option<Self> {
        let (&max, &min) = (scores.first()?, scores.last()?);
        let count = scores.len();
        let mean = scores.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 1 {
            scores[count / 2]
        } else {
            (scores[count / 2 - 1] + scores[count / 2]) / 2.0
        };
        let p90 = scores[count.div_ceil(10) - 1];

        Some(Self {
            count,
            max,
            min,
            mean,
            median,
            p90,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_distribution() {
        assert!(ScoreDistribution::from_descending(&[]).is_none());
    }

    #[test]
    fn summarizes_descending_scores() {
        let scores: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        let d = ScoreDistribution::from_descending(&scores).expect("non-empty");
        assert_eq!(d.count, 20);
        assert_eq!(d.max, 20.0);
        assert_eq!(d.min, 1.0);
        assert!((d.mean - 10.5).abs() < 1e-12);
        assert!((d.median - 10.5).abs() < 1e-12);
        assert_eq!(d.p90, 19.0);
    }

    #[test]
    fn single_entry() {
        let d = ScoreDistribution::from_descending(&[0.42]).expect("non-empty");
        assert_eq!(d.median, 0.42);
        assert_eq!(d.p90, 0.42);
    }
}
