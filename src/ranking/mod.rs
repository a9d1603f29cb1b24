//! Ranking of scored patents and comparison between rankings.

mod compare;
mod distribution;
mod ranker;

pub use compare::{overlap_at, spearman, RankingComparison, TopOverlap, DEFAULT_OVERLAP_CUTOFFS};
pub use distribution::ScoreDistribution;
pub use ranker::{rank_cmp, rank_order, RankSource, Ranker};
