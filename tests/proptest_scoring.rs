//! Property-based tests for scoring and ranking invariants.

use indexmap::IndexMap;
use ipport::compute;
use ipport::model::{PatentRecord, ScoredPatent};
use ipport::ranking::{RankSource, Ranker};
use ipport::scoring::{year_multiplier, ConsensusWeights, WeightProfile};
use ipport::summary::median;
use proptest::prelude::*;

fn record(years: f64, citations: f64, quality: Option<f64>) -> PatentRecord {
    let mut r = PatentRecord::new("US1");
    r.years_remaining = years;
    r.competitor_citations = citations;
    r.competitor_count = citations / 3.0;
    r.forward_citations = citations * citations;
    for (_, slot) in r.quality.fields_mut() {
        *slot = quality;
    }
    r
}

fn weight_array() -> impl Strategy<Value = [f64; 10]> {
    prop::array::uniform10(0.0f64..1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn year_multiplier_is_bounded(years in -50.0f64..100.0) {
        let m = year_multiplier(years);
        prop_assert!((0.3..=1.0).contains(&m), "multiplier {} for {} years", m, years);
        if years >= 15.0 {
            prop_assert_eq!(m, 1.0);
        }
    }

    #[test]
    fn final_score_non_decreasing_in_years(
        weights in weight_array(),
        a in 0.0f64..30.0,
        b in 0.0f64..30.0,
        citations in 0.0f64..40.0,
        quality in prop::option::of(1.0f64..=5.0),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let profile = WeightProfile::from_array("p", weights).unwrap();
        let consensus = ConsensusWeights::resolve(
            &IndexMap::from([("p".to_string(), 1.0)]),
            ["p"],
            false,
        )
        .unwrap();

        let low = compute(
            vec![record(lo, citations, quality)],
            &[profile.clone()],
            &consensus,
        )
        .unwrap();
        let high =
            compute(vec![record(hi, citations, quality)], &[profile], &consensus).unwrap();
        let low = low.scored[0].final_score("p").unwrap();
        let high = high.scored[0].final_score("p").unwrap();
        prop_assert!(high + 1e-12 >= low, "{} years -> {}, {} years -> {}", lo, low, hi, high);

        if lo >= 15.0 {
            prop_assert!((high - low).abs() < 1e-12);
        }
    }

    #[test]
    fn consensus_matches_weighted_sum(
        w1 in weight_array(),
        w2 in weight_array(),
        c1 in 0.0f64..5.0,
        c2 in 0.0f64..5.0,
        renormalize in any::<bool>(),
        years in 0.0f64..20.0,
        citations in 0.0f64..40.0,
    ) {
        let profiles = vec![
            WeightProfile::from_array("a", w1).unwrap(),
            WeightProfile::from_array("b", w2).unwrap(),
        ];
        let raw = IndexMap::from([("a".to_string(), c1), ("b".to_string(), c2 + 0.01)]);
        let consensus = ConsensusWeights::resolve(&raw, ["a", "b"], renormalize).unwrap();
        let results = compute(vec![record(years, citations, None)], &profiles, &consensus).unwrap();

        let patent = &results.scored[0];
        let expected: f64 = consensus
            .iter()
            .map(|(name, w)| patent.final_score(name).unwrap() * w)
            .sum();
        prop_assert!((patent.consensus_score - expected).abs() < 1e-9);
    }

    #[test]
    fn ranking_is_a_permutation(scores in prop::collection::vec(0.0f64..1.0, 0..60)) {
        let patents: Vec<ScoredPatent> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| ScoredPatent {
                patent_id: format!("US{:04}", i % 17),
                profiles: IndexMap::new(),
                consensus_score: s,
            })
            .collect();
        let ranked = Ranker::new().rank(&patents, &RankSource::Consensus);

        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        prop_assert_eq!(ranks, (1..=patents.len()).collect::<Vec<_>>());
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn median_is_sorted_middle(ranks in prop::collection::vec(1usize..1000, 1..50)) {
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        let n = sorted.len();
        let expected = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        prop_assert_eq!(median(&ranks), expected);
    }
}
