//! Data-quality pass run before scoring.
//!
//! Bad values never fail a run. Each coercion is recorded as a
//! [`DataQualityIssue`] and logged at `warn`.

use crate::model::PatentRecord;
use crate::scoring::{QUALITY_SCALE_MAX, QUALITY_SCALE_MIN};
use crate::summary::UNASSIGNED_SECTOR;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the data-quality pass did about a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    /// Non-numeric, negative or out-of-range value replaced with 0
    CoercedToZero,
    /// Record without an id left out of the run
    DroppedEmptyId,
    /// Earlier record with a repeated id left out; the later one is kept
    DroppedDuplicate,
    /// Surviving record of a repeated id
    KeptDuplicate,
    /// Blank sector grouped as `unassigned`
    SectorUnassigned,
}

/// One data-quality event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityIssue {
    pub patent_id: String,
    pub field: String,
    /// The offending value, when numeric (`null` for unparseable input)
    pub raw_value: Option<f64>,
    pub action: IssueAction,
}

impl DataQualityIssue {
    fn new(patent_id: &str, field: &str, raw_value: Option<f64>, action: IssueAction) -> Self {
        Self {
            patent_id: patent_id.to_string(),
            field: field.to_string(),
            raw_value,
            action,
        }
    }
}

/// Records ready for scoring, plus everything that was fixed on the way.
#[derive(Debug, Clone, Default)]
pub struct SanitizedRecords {
    pub records: Vec<PatentRecord>,
    pub issues: Vec<DataQualityIssue>,
}

/// Clean a record batch.
///
/// Order is preserved. Records with an empty id are dropped, and when an id
/// repeats only its last occurrence survives. Both sides of a repeat are
/// reported.
#[must_use]
pub fn sanitize(records: Vec<PatentRecord>) -> SanitizedRecords {
    let mut issues = Vec::new();

    // id -> (index of last occurrence, occurrence count)
    let mut last_index: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        let entry = last_index
            .entry(record.patent_id.trim().to_string())
            .or_insert((idx, 0));
        *entry = (idx, entry.1 + 1);
    }

    let mut kept = Vec::with_capacity(records.len());
    for (idx, mut record) in records.into_iter().enumerate() {
        let id = record.patent_id.trim().to_string();
        if id.is_empty() {
            issues.push(DataQualityIssue::new(
                "",
                "patentId",
                None,
                IssueAction::DroppedEmptyId,
            ));
            continue;
        }
        let (last, occurrences) = last_index.get(&id).copied().unwrap_or((idx, 1));
        if last != idx {
            issues.push(DataQualityIssue::new(
                &id,
                "patentId",
                None,
                IssueAction::DroppedDuplicate,
            ));
            continue;
        }
        if occurrences > 1 {
            issues.push(DataQualityIssue::new(
                &id,
                "patentId",
                None,
                IssueAction::KeptDuplicate,
            ));
        }
        record.patent_id = id;
        clean_record(&mut record, &mut issues);
        kept.push(record);
    }

    for issue in &issues {
        tracing::warn!(
            patent = %issue.patent_id,
            field = %issue.field,
            raw = ?issue.raw_value,
            action = ?issue.action,
            "data quality issue"
        );
    }

    SanitizedRecords {
        records: kept,
        issues,
    }
}

fn clean_record(record: &mut PatentRecord, issues: &mut Vec<DataQualityIssue>) {
    let id = record.patent_id.clone();

    let counts: [(&str, &mut f64); 4] = [
        ("yearsRemaining", &mut record.years_remaining),
        ("forwardCitations", &mut record.forward_citations),
        ("competitorCitations", &mut record.competitor_citations),
        ("competitorCount", &mut record.competitor_count),
    ];
    for (field, value) in counts {
        if !value.is_finite() || *value < 0.0 {
            issues.push(coerced(&id, field, *value));
            *value = 0.0;
        }
    }

    for (field, slot) in record.quality.fields_mut() {
        if let Some(value) = slot {
            if !value.is_finite() || *value < QUALITY_SCALE_MIN || *value > QUALITY_SCALE_MAX {
                issues.push(coerced(&id, field, *value));
                *value = 0.0;
            }
        }
    }

    if record.sector.trim().is_empty() {
        issues.push(DataQualityIssue::new(
            &id,
            "sector",
            None,
            IssueAction::SectorUnassigned,
        ));
        record.sector = UNASSIGNED_SECTOR.to_string();
    }
}

fn coerced(id: &str, field: &str, value: f64) -> DataQualityIssue {
    let raw = value.is_finite().then_some(value);
    DataQualityIssue::new(id, field, raw, IssueAction::CoercedToZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PatentRecord {
        let mut r = PatentRecord::new(id);
        r.sector = "video-codec".to_string();
        r
    }

    #[test]
    fn clean_batch_has_no_issues() {
        let mut r = record("US1");
        r.years_remaining = 12.0;
        r.quality.validity = Some(4.0);
        let out = sanitize(vec![r.clone()]);
        assert!(out.issues.is_empty());
        assert_eq!(out.records, vec![r]);
    }

    #[test]
    fn bad_numbers_are_coerced() {
        let mut r = record("US1");
        r.years_remaining = -2.0;
        r.forward_citations = f64::NAN;
        r.quality.eligibility = Some(7.0);
        r.quality.ipr_risk = Some(0.5);
        r.quality.validity = None;

        let out = sanitize(vec![r]);
        let cleaned = &out.records[0];
        assert_eq!(cleaned.years_remaining, 0.0);
        assert_eq!(cleaned.forward_citations, 0.0);
        assert_eq!(cleaned.quality.eligibility, Some(0.0));
        assert_eq!(cleaned.quality.ipr_risk, Some(0.0));
        assert_eq!(cleaned.quality.validity, None);

        let fields: Vec<&str> = out.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["yearsRemaining", "forwardCitations", "eligibility", "iprRisk"]
        );
        assert_eq!(out.issues[0].raw_value, Some(-2.0));
        assert_eq!(out.issues[1].raw_value, None);
        assert!(out
            .issues
            .iter()
            .all(|i| i.action == IssueAction::CoercedToZero));
    }

    #[test]
    fn duplicates_keep_the_last_occurrence() {
        let mut first = record("US1");
        first.title = "first".to_string();
        let mut second = record(" US1 ");
        second.title = "second".to_string();

        let out = sanitize(vec![first, record("US2"), second]);
        let ids: Vec<&str> = out.records.iter().map(|r| r.patent_id.as_str()).collect();
        assert_eq!(ids, vec!["US2", "US1"]);
        assert_eq!(out.records[1].title, "second");
        let actions: Vec<(&str, IssueAction)> = out
            .issues
            .iter()
            .map(|i| (i.patent_id.as_str(), i.action))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("US1", IssueAction::DroppedDuplicate),
                ("US1", IssueAction::KeptDuplicate),
            ]
        );
    }

    #[test]
    fn triplicate_ids_report_each_drop_once_and_the_survivor_once() {
        let out = sanitize(vec![record("US1"), record("US1"), record("US1")]);
        assert_eq!(out.records.len(), 1);
        let dropped = out
            .issues
            .iter()
            .filter(|i| i.action == IssueAction::DroppedDuplicate)
            .count();
        let kept = out
            .issues
            .iter()
            .filter(|i| i.action == IssueAction::KeptDuplicate)
            .count();
        assert_eq!((dropped, kept), (2, 1));
    }

    #[test]
    fn empty_ids_and_sectors() {
        let mut blank_sector = record("US3");
        blank_sector.sector = "  ".to_string();

        let out = sanitize(vec![record(""), blank_sector]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].sector, UNASSIGNED_SECTOR);
        let actions: Vec<IssueAction> = out.issues.iter().map(|i| i.action).collect();
        assert_eq!(
            actions,
            vec![IssueAction::DroppedEmptyId, IssueAction::SectorUnassigned]
        );
    }
}
