//! Stakeholder weight profiles.

use super::normalize::{Metric, NormalizedMetrics, METRIC_COUNT};
use crate::error::{ConfigErrorKind, IpPortError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weight slots as written in configuration.
///
/// Every slot is optional at this layer so that a missing slot can be
/// reported by name instead of failing deep inside deserialization. Unknown
/// slot names are rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WeightSlots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_citations: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_citations: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_breadth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement_clarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_around_difficulty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipr_risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosecution_quality: Option<f64>,
}

impl WeightSlots {
    /// Slot value for a metric.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CompetitorCitations => self.competitor_citations,
            Metric::CompetitorCount => self.competitor_count,
            Metric::ForwardCitations => self.forward_citations,
            Metric::Eligibility => self.eligibility,
            Metric::Validity => self.validity,
            Metric::ClaimBreadth => self.claim_breadth,
            Metric::EnforcementClarity => self.enforcement_clarity,
            Metric::DesignAroundDifficulty => self.design_around_difficulty,
            Metric::IprRisk => self.ipr_risk,
            Metric::ProsecutionQuality => self.prosecution_quality,
        }
    }

    /// Fully populated slots from a weight array.
    #[must_use]
    pub const fn from_array(w: [f64; METRIC_COUNT]) -> Self {
        Self {
            competitor_citations: Some(w[0]),
            competitor_count: Some(w[1]),
            forward_citations: Some(w[2]),
            eligibility: Some(w[3]),
            validity: Some(w[4]),
            claim_breadth: Some(w[5]),
            enforcement_clarity: Some(w[6]),
            design_around_difficulty: Some(w[7]),
            ipr_risk: Some(w[8]),
            prosecution_quality: Some(w[9]),
        }
    }
}

/// A complete weight vector: exactly one finite, non-negative weight per
/// metric. Weights need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector([f64; METRIC_COUNT]);

impl WeightVector {
    /// Resolve configured slots, failing on the first missing or invalid one.
    pub fn from_slots(profile: &str, slots: &WeightSlots) -> Result<Self> {
        let mut weights = [0.0; METRIC_COUNT];
        for metric in Metric::ALL {
            let value = slots
                .get(metric)
                .ok_or_else(|| IpPortError::missing_weight(profile, metric.key()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(IpPortError::config(
                    format!("profile '{profile}'"),
                    ConfigErrorKind::InvalidWeight {
                        profile: profile.to_string(),
                        metric: metric.key().to_string(),
                        value,
                    },
                ));
            }
            weights[metric.index()] = value;
        }
        Ok(Self(weights))
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; METRIC_COUNT] {
        &self.0
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `Σ normalized_i * weight_i`
    #[must_use]
    pub fn dot(&self, metrics: &NormalizedMetrics) -> f64 {
        self.0
            .iter()
            .zip(metrics.as_array())
            .map(|(w, m)| w * m)
            .sum()
    }
}

/// A named stakeholder perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weights: WeightVector,
}

impl WeightProfile {
    pub fn new(name: impl Into<String>, weights: WeightVector) -> Self {
        Self {
            name: name.into(),
            description: None,
            weights,
        }
    }

    /// Build a profile from a raw weight array, validating every slot.
    pub fn from_array(name: impl Into<String>, weights: [f64; METRIC_COUNT]) -> Result<Self> {
        let name = name.into();
        let vector = WeightVector::from_slots(&name, &WeightSlots::from_array(weights))?;
        Ok(Self::new(name, vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVEN: [f64; METRIC_COUNT] = [0.1; METRIC_COUNT];

    #[test]
    fn complete_slots_resolve() {
        let vector = WeightVector::from_slots("even", &WeightSlots::from_array(EVEN))
            .expect("complete slots should resolve");
        assert!((vector.sum() - 1.0).abs() < 1e-9);
        assert_eq!(vector.get(Metric::ProsecutionQuality), 0.1);
    }

    #[test]
    fn missing_slot_is_fatal_and_named() {
        let mut slots = WeightSlots::from_array(EVEN);
        slots.design_around_difficulty = None;
        let err = WeightVector::from_slots("licensing", &slots).unwrap_err();
        match err {
            IpPortError::Config {
                source: ConfigErrorKind::MissingWeight { profile, metric },
                ..
            } => {
                assert_eq!(profile, "licensing");
                assert_eq!(metric, "design_around_difficulty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_or_nan_weight_is_fatal() {
        let mut w = EVEN;
        w[2] = -0.1;
        assert!(WeightProfile::from_array("bad", w).is_err());
        w[2] = f64::NAN;
        assert!(WeightProfile::from_array("bad", w).is_err());
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let profile = WeightProfile::from_array("heavy", [2.0; METRIC_COUNT])
            .expect("large weights are allowed");
        assert!((profile.weights.sum() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_slot_names_are_rejected() {
        let yaml = "competitor_citations: 0.5\nyears_remaining: 0.5\n";
        assert!(serde_yaml::from_str::<WeightSlots>(yaml).is_err());
    }
}
