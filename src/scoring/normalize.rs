//! Metric normalization.
//!
//! Every raw metric is mapped into `[0, 1]`. Missing quality signals take
//! fixed defaults rather than zero, and nothing here ever fails.

use crate::model::PatentRecord;
use serde::{Deserialize, Serialize};

/// Competitor citations at which the metric saturates
pub const COMPETITOR_CITATION_CAP: f64 = 30.0;
/// Distinct citing competitors at which the metric saturates
pub const COMPETITOR_COUNT_CAP: f64 = 10.0;
/// `sqrt(forward citations)` at which the metric saturates (400 citations)
pub const FORWARD_CITATION_SQRT_CAP: f64 = 20.0;
/// Top of the 1-5 assessment scale
pub const QUALITY_SCALE_MAX: f64 = 5.0;
/// Bottom of the 1-5 assessment scale
pub const QUALITY_SCALE_MIN: f64 = 1.0;
/// Normalized value used when a quality signal was never assessed
pub const DEFAULT_QUALITY: f64 = 0.6;
/// Normalized value used when no IPR risk assessment exists
pub const DEFAULT_IPR_RISK: f64 = 0.8;

/// The ten weighted metrics, in weight-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CompetitorCitations,
    CompetitorCount,
    ForwardCitations,
    Eligibility,
    Validity,
    ClaimBreadth,
    EnforcementClarity,
    DesignAroundDifficulty,
    IprRisk,
    ProsecutionQuality,
}

/// Number of weighted metrics
pub const METRIC_COUNT: usize = 10;

impl Metric {
    /// All metrics in weight-vector order.
    pub const ALL: [Self; METRIC_COUNT] = [
        Self::CompetitorCitations,
        Self::CompetitorCount,
        Self::ForwardCitations,
        Self::Eligibility,
        Self::Validity,
        Self::ClaimBreadth,
        Self::EnforcementClarity,
        Self::DesignAroundDifficulty,
        Self::IprRisk,
        Self::ProsecutionQuality,
    ];

    /// Position in a weight vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Configuration key for the weight slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CompetitorCitations => "competitor_citations",
            Self::CompetitorCount => "competitor_count",
            Self::ForwardCitations => "forward_citations",
            Self::Eligibility => "eligibility",
            Self::Validity => "validity",
            Self::ClaimBreadth => "claim_breadth",
            Self::EnforcementClarity => "enforcement_clarity",
            Self::DesignAroundDifficulty => "design_around_difficulty",
            Self::IprRisk => "ipr_risk",
            Self::ProsecutionQuality => "prosecution_quality",
        }
    }

    /// Whether the metric comes from the 1-5 quality assessment.
    #[must_use]
    pub const fn is_quality_signal(self) -> bool {
        !matches!(
            self,
            Self::CompetitorCitations | Self::CompetitorCount | Self::ForwardCitations
        )
    }

    /// Normalized value assumed when the signal is absent.
    #[must_use]
    pub const fn missing_default(self) -> f64 {
        match self {
            Self::IprRisk => DEFAULT_IPR_RISK,
            Self::CompetitorCitations | Self::CompetitorCount | Self::ForwardCitations => 0.0,
            _ => DEFAULT_QUALITY,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A count-like value usable in arithmetic: finite and non-negative, else 0.
#[must_use]
pub fn clean_count(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A quality signal within the 1-5 scale, else 0.
#[must_use]
pub fn clean_quality(value: f64) -> f64 {
    if value.is_finite() && (QUALITY_SCALE_MIN..=QUALITY_SCALE_MAX).contains(&value) {
        value
    } else {
        0.0
    }
}

/// Normalized metric values for one patent, in [`Metric::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics([f64; METRIC_COUNT]);

impl NormalizedMetrics {
    #[must_use]
    pub const fn as_array(&self) -> &[f64; METRIC_COUNT] {
        &self.0
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }
}

/// Converts raw record metrics into [`NormalizedMetrics`].
///
/// Invalid numbers are treated as 0 before capping. The data-quality pass
/// in the pipeline is what reports them; normalization itself stays silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricNormalizer;

impl MetricNormalizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalize every weighted metric of a record.
    #[must_use]
    pub fn normalize(&self, record: &PatentRecord) -> NormalizedMetrics {
        let mut values = [0.0; METRIC_COUNT];
        for metric in Metric::ALL {
            values[metric.index()] = self.normalize_metric(record, metric);
        }
        NormalizedMetrics(values)
    }

    /// Normalize a single metric of a record.
    #[must_use]
    pub fn normalize_metric(&self, record: &PatentRecord, metric: Metric) -> f64 {
        let q = &record.quality;
        match metric {
            Metric::CompetitorCitations => {
                (clean_count(record.competitor_citations) / COMPETITOR_CITATION_CAP).min(1.0)
            }
            Metric::CompetitorCount => {
                (clean_count(record.competitor_count) / COMPETITOR_COUNT_CAP).min(1.0)
            }
            Metric::ForwardCitations => {
                (clean_count(record.forward_citations).sqrt() / FORWARD_CITATION_SQRT_CAP).min(1.0)
            }
            Metric::Eligibility => quality(q.eligibility, metric),
            Metric::Validity => quality(q.validity, metric),
            Metric::ClaimBreadth => quality(q.claim_breadth, metric),
            Metric::EnforcementClarity => quality(q.enforcement_clarity, metric),
            Metric::DesignAroundDifficulty => quality(q.design_around_difficulty, metric),
            Metric::IprRisk => quality(q.ipr_risk, metric),
            Metric::ProsecutionQuality => quality(q.prosecution_quality, metric),
        }
    }
}

fn quality(value: Option<f64>, metric: Metric) -> f64 {
    value.map_or_else(
        || metric.missing_default(),
        |v| clean_quality(v) / QUALITY_SCALE_MAX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatentRecord {
        PatentRecord::new("US100")
    }

    #[test]
    fn metric_indices_follow_declaration_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        assert_eq!(Metric::IprRisk.key(), "ipr_risk");
    }

    #[test]
    fn citation_metrics_saturate() {
        let mut r = record();
        r.competitor_citations = 15.0;
        r.competitor_count = 20.0;
        r.forward_citations = 100.0;
        let n = MetricNormalizer::new().normalize(&r);

        assert!((n.get(Metric::CompetitorCitations) - 0.5).abs() < 1e-12);
        assert_eq!(n.get(Metric::CompetitorCount), 1.0);
        assert!((n.get(Metric::ForwardCitations) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn missing_quality_signals_take_defaults() {
        let n = MetricNormalizer::new().normalize(&record());
        for metric in Metric::ALL {
            let expected = match metric {
                Metric::IprRisk => 0.8,
                m if m.is_quality_signal() => 0.6,
                _ => 0.0,
            };
            assert_eq!(n.get(metric), expected, "{metric}");
        }
    }

    #[test]
    fn present_quality_signals_scale_by_five() {
        let mut r = record();
        r.quality.validity = Some(4.0);
        r.quality.ipr_risk = Some(1.0);
        let n = MetricNormalizer::new().normalize(&r);
        assert!((n.get(Metric::Validity) - 0.8).abs() < 1e-12);
        assert!((n.get(Metric::IprRisk) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn invalid_inputs_are_zero_before_capping() {
        let mut r = record();
        r.competitor_citations = f64::NAN;
        r.competitor_count = -4.0;
        r.forward_citations = f64::INFINITY;
        r.quality.eligibility = Some(9.0);
        r.quality.validity = Some(f64::NAN);
        let n = MetricNormalizer::new().normalize(&r);

        assert_eq!(n.get(Metric::CompetitorCitations), 0.0);
        assert_eq!(n.get(Metric::CompetitorCount), 0.0);
        assert_eq!(n.get(Metric::ForwardCitations), 0.0);
        assert_eq!(n.get(Metric::Eligibility), 0.0);
        assert_eq!(n.get(Metric::Validity), 0.0);
    }

    #[test]
    fn all_values_bounded() {
        let mut r = record();
        r.competitor_citations = 1e9;
        r.forward_citations = 1e9;
        r.quality.claim_breadth = Some(5.0);
        let n = MetricNormalizer::new().normalize(&r);
        assert!(n.as_array().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
