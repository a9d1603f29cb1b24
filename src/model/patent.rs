//! Imported patent records.

use super::lenient;
use serde::{Deserialize, Serialize};

/// Quality assessments produced by the external review process.
///
/// Every signal is on a 1-5 scale and may be absent when no assessment
/// exists for the patent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySignals {
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub eligibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub validity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub claim_breadth: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub enforcement_clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub design_around_difficulty: Option<f64>,
    /// Carried through to reports; not one of the weighted metrics.
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub market_relevance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub ipr_risk: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub prosecution_quality: Option<f64>,
}

impl QualitySignals {
    /// Every signal with its field name, in declaration order.
    pub fn fields_mut(&mut self) -> [(&'static str, &mut Option<f64>); 8] {
        [
            ("eligibility", &mut self.eligibility),
            ("validity", &mut self.validity),
            ("claimBreadth", &mut self.claim_breadth),
            ("enforcementClarity", &mut self.enforcement_clarity),
            ("designAroundDifficulty", &mut self.design_around_difficulty),
            ("marketRelevance", &mut self.market_relevance),
            ("iprRisk", &mut self.ipr_risk),
            ("prosecutionQuality", &mut self.prosecution_quality),
        ]
    }
}

/// One patent as handed over by the import collaborator.
///
/// Records are treated as immutable once imported; the data-quality pass
/// works on a sanitized copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub patent_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub grant_date: Option<String>,
    /// Raw owner string as it appears in the source data
    #[serde(default, deserialize_with = "lenient::text")]
    pub assignee: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub years_remaining: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub forward_citations: f64,
    /// Citations coming from tracked competitors
    #[serde(default, deserialize_with = "lenient::number")]
    pub competitor_citations: f64,
    /// Distinct tracked competitors citing the patent
    #[serde(default, deserialize_with = "lenient::number")]
    pub competitor_count: f64,
    #[serde(default, deserialize_with = "lenient::name_list")]
    pub competitor_names: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sector: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub sector_display_name: Option<String>,
    #[serde(flatten)]
    pub quality: QualitySignals,
}

impl PatentRecord {
    /// Create a record with only an id; the remaining fields take defaults.
    pub fn new(patent_id: impl Into<String>) -> Self {
        Self {
            patent_id: patent_id.into(),
            ..Self::default()
        }
    }

    /// The sector's human label, falling back to the raw label.
    #[must_use]
    pub fn sector_label(&self) -> &str {
        self.sector_display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.sector)
    }

    /// Whether the patent still has at least `threshold` years of term.
    #[must_use]
    pub fn is_active(&self, threshold: f64) -> bool {
        self.years_remaining >= threshold
    }
}
