//! Per-profile patent scoring.
//!
//! ```text
//! base_score(p, w)  = Σ normalized_i(p) * weight_i(w)
//! year_multiplier   = 0.3 + 0.7 * min(1, (max(0, years) / 15) ^ 0.8)
//! final_score(p, w) = base_score(p, w) * year_multiplier(p)
//! ```

use super::normalize::{clean_count, MetricNormalizer, NormalizedMetrics};
use super::weights::WeightProfile;
use crate::model::{PatentRecord, ProfileScore};
use indexmap::IndexMap;

/// Residual multiplier for a patent with no remaining term
pub const YEAR_MULTIPLIER_FLOOR: f64 = 0.3;
/// Share of the multiplier earned by remaining term
pub const YEAR_MULTIPLIER_SPAN: f64 = 0.7;
/// Remaining years at which the multiplier reaches 1.0
pub const FULL_TERM_YEARS: f64 = 15.0;
/// Diminishing-returns exponent
pub const YEAR_EXPONENT: f64 = 0.8;

/// Remaining-term multiplier, bounded to `[0.3, 1.0]`.
#[must_use]
pub fn year_multiplier(years_remaining: f64) -> f64 {
    let years = clean_count(years_remaining);
    if years >= FULL_TERM_YEARS {
        return 1.0;
    }
    let factor = (years / FULL_TERM_YEARS).powf(YEAR_EXPONENT).min(1.0);
    YEAR_MULTIPLIER_FLOOR + YEAR_MULTIPLIER_SPAN * factor
}

/// Scores records under a fixed set of profiles.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    profiles: &'a [WeightProfile],
    normalizer: MetricNormalizer,
}

impl<'a> Scorer<'a> {
    #[must_use]
    pub const fn new(profiles: &'a [WeightProfile]) -> Self {
        Self {
            profiles,
            normalizer: MetricNormalizer::new(),
        }
    }

    /// Score under one profile given already-normalized metrics.
    #[must_use]
    pub fn score_normalized(
        profile: &WeightProfile,
        metrics: &NormalizedMetrics,
        multiplier: f64,
    ) -> ProfileScore {
        let base_score = profile.weights.dot(metrics);
        ProfileScore {
            base_score,
            year_multiplier: multiplier,
            final_score: base_score * multiplier,
        }
    }

    /// Score one record under every profile, keyed by profile name in
    /// configuration order.
    #[must_use]
    pub fn score(&self, record: &PatentRecord) -> IndexMap<String, ProfileScore> {
        let metrics = self.normalizer.normalize(record);
        let multiplier = year_multiplier(record.years_remaining);
        self.profiles
            .iter()
            .map(|profile| {
                (
                    profile.name.clone(),
                    Self::score_normalized(profile, &metrics, multiplier),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalize::METRIC_COUNT;

    fn even_profile() -> WeightProfile {
        WeightProfile::from_array("even", [0.1; METRIC_COUNT]).expect("valid profile")
    }

    #[test]
    fn multiplier_bounds() {
        assert!((year_multiplier(0.0) - 0.3).abs() < 1e-12);
        assert!((year_multiplier(-5.0) - 0.3).abs() < 1e-12);
        assert!((year_multiplier(f64::NAN) - 0.3).abs() < 1e-12);
        assert_eq!(year_multiplier(15.0), 1.0);
        assert_eq!(year_multiplier(40.0), 1.0);
    }

    #[test]
    fn multiplier_is_concave_below_full_term() {
        let half = year_multiplier(7.5);
        let expected = 0.3 + 0.7 * 0.5_f64.powf(0.8);
        assert!((half - expected).abs() < 1e-12);
        // Diminishing returns: the first half of the term is worth more than linear.
        assert!(half > 0.3 + 0.7 * 0.5);
    }

    #[test]
    fn maximal_patent_scores_one() {
        let mut record = PatentRecord::new("US-MAX");
        record.competitor_citations = 30.0;
        record.competitor_count = 10.0;
        record.forward_citations = 400.0;
        record.years_remaining = 15.0;
        let q = &mut record.quality;
        for (_, value) in q.fields_mut() {
            *value = Some(5.0);
        }

        let profiles = [even_profile()];
        let scores = Scorer::new(&profiles).score(&record);
        let score = scores["even"];
        assert!((score.base_score - 1.0).abs() < 1e-9);
        assert_eq!(score.year_multiplier, 1.0);
        assert!((score.final_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_patent_uses_defaults_and_floor() {
        let record = PatentRecord::new("US-EMPTY");
        let profiles = [even_profile()];
        let score = Scorer::new(&profiles).score(&record)["even"];

        // Six quality signals default to 0.6, IPR risk to 0.8, citations to 0.
        let expected_base = 0.1 * (6.0 * 0.6 + 0.8);
        assert!((score.base_score - expected_base).abs() < 1e-12);
        assert!((score.year_multiplier - 0.3).abs() < 1e-12);
        assert!((score.final_score - 0.3 * expected_base).abs() < 1e-12);
    }

    #[test]
    fn multiplier_is_shared_across_profiles() {
        let mut record = PatentRecord::new("US-SHARED");
        record.years_remaining = 6.0;
        let mut w = [0.0; METRIC_COUNT];
        w[0] = 1.0;
        let profiles = [
            even_profile(),
            WeightProfile::from_array("citations-only", w).expect("valid profile"),
        ];
        let scores = Scorer::new(&profiles).score(&record);

        assert_eq!(scores.len(), 2);
        assert_eq!(
            scores["even"].year_multiplier,
            scores["citations-only"].year_multiplier
        );
        assert_eq!(scores.get_index(0).map(|(k, _)| k.as_str()), Some("even"));
    }
}
