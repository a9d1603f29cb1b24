//! Patent scoring: metric normalization, per-profile scores and the
//! consensus blend.

mod consensus;
mod normalize;
mod scorer;
mod weights;

pub use consensus::{ConsensusAggregator, ConsensusWeights};
pub use normalize::{
    clean_count, clean_quality, Metric, MetricNormalizer, NormalizedMetrics,
    COMPETITOR_CITATION_CAP, COMPETITOR_COUNT_CAP, DEFAULT_IPR_RISK, DEFAULT_QUALITY,
    FORWARD_CITATION_SQRT_CAP, METRIC_COUNT, QUALITY_SCALE_MAX, QUALITY_SCALE_MIN,
};
pub use scorer::{
    year_multiplier, Scorer, FULL_TERM_YEARS, YEAR_EXPONENT, YEAR_MULTIPLIER_FLOOR,
    YEAR_MULTIPLIER_SPAN,
};
pub use weights::{WeightProfile, WeightSlots, WeightVector};
