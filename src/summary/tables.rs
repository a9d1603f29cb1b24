//! The four grouped summary tables.

use super::affiliate::AffiliateResolver;
use super::classifier::SuperSector;
use super::stats::{GroupAccumulator, GroupStats, TopCited};
use crate::config::SummaryConfig;
use crate::model::{PatentRecord, RankedEntry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Group key for records without a sector label
pub const UNASSIGNED_SECTOR: &str = "unassigned";

/// One row per competitor name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRow {
    pub competitor: String,
    #[serde(flatten)]
    pub stats: GroupStats,
    /// Best-ranked patents referencing the competitor
    pub top_patents: Vec<String>,
}

/// One row per canonical affiliate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateRow {
    pub affiliate: String,
    #[serde(flatten)]
    pub stats: GroupStats,
    pub active_count: usize,
    pub avg_years_remaining: f64,
    pub top_cited: Option<TopCited>,
    pub sectors: Vec<String>,
}

/// One row per raw sector label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRow {
    pub sector: String,
    pub display_name: Option<String>,
    pub super_sector: SuperSector,
    #[serde(flatten)]
    pub stats: GroupStats,
    pub active_count: usize,
    pub avg_years_remaining: f64,
    pub top_cited: Option<TopCited>,
    pub unique_competitors: usize,
    pub affiliates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSectorCount {
    pub sector: String,
    pub count: usize,
}

/// One row per super-sector bucket that has at least one patent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperSectorRow {
    pub super_sector: SuperSector,
    pub display_name: String,
    #[serde(flatten)]
    pub stats: GroupStats,
    /// Distinct raw sectors rolling up into this bucket
    pub sector_count: usize,
    pub top_cited: Option<TopCited>,
    pub top_sub_sectors: Vec<SubSectorCount>,
}

/// All grouped summaries for one ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTables {
    /// Label of the ranking the rank statistics come from
    pub rank_source: String,
    pub competitors: Vec<CompetitorRow>,
    pub affiliates: Vec<AffiliateRow>,
    pub sectors: Vec<SectorRow>,
    pub super_sectors: Vec<SuperSectorRow>,
}

impl SummaryTables {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
            && self.affiliates.is_empty()
            && self.sectors.is_empty()
            && self.super_sectors.is_empty()
    }
}

/// Grouping key for a record's sector.
#[must_use]
pub fn sector_key(record: &PatentRecord) -> &str {
    let sector = record.sector.trim();
    if sector.is_empty() {
        UNASSIGNED_SECTOR
    } else {
        sector
    }
}

#[derive(Default)]
struct AffiliateGroup {
    acc: GroupAccumulator,
    sectors: BTreeSet<String>,
}

#[derive(Default)]
struct SectorGroup {
    acc: GroupAccumulator,
    display_name: Option<String>,
    competitors: HashSet<String>,
    affiliates: BTreeSet<String>,
}

#[derive(Default)]
struct SuperSectorGroup {
    acc: GroupAccumulator,
    /// sector -> patent count, in encounter order
    sub_sectors: IndexMap<String, usize>,
}

/// Builds [`SummaryTables`] from records and one of their rankings.
pub struct SummaryBuilder<'a> {
    options: &'a SummaryConfig,
    resolver: &'a AffiliateResolver,
}

impl<'a> SummaryBuilder<'a> {
    #[must_use]
    pub const fn new(options: &'a SummaryConfig, resolver: &'a AffiliateResolver) -> Self {
        Self { options, resolver }
    }

    /// Accumulate every record that appears in `ranking`, in record order.
    #[must_use]
    pub fn build(
        &self,
        rank_source: &str,
        records: &[PatentRecord],
        ranking: &[RankedEntry],
    ) -> SummaryTables {
        let ranks: HashMap<&str, usize> = ranking
            .iter()
            .map(|entry| (entry.patent_id(), entry.rank))
            .collect();
        let threshold = self.options.active_years_threshold;

        let mut competitors: IndexMap<String, GroupAccumulator> = IndexMap::new();
        let mut affiliates: IndexMap<String, AffiliateGroup> = IndexMap::new();
        let mut sectors: IndexMap<String, SectorGroup> = IndexMap::new();
        let mut supers: IndexMap<SuperSector, SuperSectorGroup> = IndexMap::new();

        for record in records {
            let Some(&rank) = ranks.get(record.patent_id.as_str()) else {
                continue;
            };
            let sector = sector_key(record);
            let affiliate = self.resolver.resolve(&record.assignee);
            let names = distinct_competitors(record);

            for name in &names {
                competitors
                    .entry((*name).to_string())
                    .or_default()
                    .add(record, rank, threshold);
            }

            let group = affiliates.entry(affiliate.clone()).or_default();
            group.acc.add(record, rank, threshold);
            group.sectors.insert(sector.to_string());

            let group = sectors.entry(sector.to_string()).or_default();
            group.acc.add(record, rank, threshold);
            if group.display_name.is_none() {
                group.display_name = record
                    .sector_display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
            }
            group
                .competitors
                .extend(names.iter().map(|n| (*n).to_string()));
            group.affiliates.insert(affiliate);

            let group = supers.entry(SuperSector::classify(sector)).or_default();
            group.acc.add(record, rank, threshold);
            *group.sub_sectors.entry(sector.to_string()).or_default() += 1;
        }

        let top_n = self.options.top_n;
        let mut competitor_rows: Vec<CompetitorRow> = competitors
            .into_iter()
            .map(|(competitor, acc)| CompetitorRow {
                competitor,
                stats: acc.stats(),
                top_patents: acc.best_ranked(top_n),
            })
            .collect();
        competitor_rows.sort_by(|a, b| {
            by_count_then_key(&a.stats, &a.competitor, &b.stats, &b.competitor)
        });

        let mut affiliate_rows: Vec<AffiliateRow> = affiliates
            .into_iter()
            .map(|(affiliate, group)| AffiliateRow {
                affiliate,
                stats: group.acc.stats(),
                active_count: group.acc.active_count(),
                avg_years_remaining: group.acc.avg_years_remaining(),
                top_cited: group.acc.top_cited(),
                sectors: group.sectors.into_iter().collect(),
            })
            .collect();
        affiliate_rows.sort_by(|a, b| {
            by_count_then_key(&a.stats, &a.affiliate, &b.stats, &b.affiliate)
        });

        let mut sector_rows: Vec<SectorRow> = sectors
            .into_iter()
            .map(|(sector, group)| SectorRow {
                super_sector: SuperSector::classify(&sector),
                sector,
                display_name: group.display_name,
                stats: group.acc.stats(),
                active_count: group.acc.active_count(),
                avg_years_remaining: group.acc.avg_years_remaining(),
                top_cited: group.acc.top_cited(),
                unique_competitors: group.competitors.len(),
                affiliates: group.affiliates.into_iter().collect(),
            })
            .collect();
        sector_rows.sort_by(|a, b| by_count_then_key(&a.stats, &a.sector, &b.stats, &b.sector));

        let top_sub = self.options.top_sub_sectors;
        let mut super_rows: Vec<SuperSectorRow> = supers
            .into_iter()
            .map(|(bucket, group)| SuperSectorRow {
                super_sector: bucket,
                display_name: bucket.display_name().to_string(),
                stats: group.acc.stats(),
                sector_count: group.sub_sectors.len(),
                top_cited: group.acc.top_cited(),
                top_sub_sectors: top_sub_sectors(group.sub_sectors, top_sub),
            })
            .collect();
        super_rows.sort_by(|a, b| {
            by_count_then_key(&a.stats, a.super_sector.code(), &b.stats, b.super_sector.code())
        });

        SummaryTables {
            rank_source: rank_source.to_string(),
            competitors: competitor_rows,
            affiliates: affiliate_rows,
            sectors: sector_rows,
            super_sectors: super_rows,
        }
    }
}

/// Trimmed, non-empty competitor names of a record, each once, in list order.
fn distinct_competitors(record: &PatentRecord) -> Vec<&str> {
    let mut seen = HashSet::new();
    record
        .competitor_names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .collect()
}

fn by_count_then_key(
    a: &GroupStats,
    a_key: &str,
    b: &GroupStats,
    b_key: &str,
) -> std::cmp::Ordering {
    b.count.cmp(&a.count).then_with(|| a_key.cmp(b_key))
}

/// Highest-count sectors; equal counts keep encounter order.
fn top_sub_sectors(counts: IndexMap<String, usize>, n: usize) -> Vec<SubSectorCount> {
    let mut list: Vec<SubSectorCount> = counts
        .into_iter()
        .map(|(sector, count)| SubSectorCount { sector, count })
        .collect();
    list.sort_by(|a, b| b.count.cmp(&a.count));
    list.truncate(n);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScoredPatent;

    fn record(
        id: &str,
        assignee: &str,
        sector: &str,
        competitors: &[&str],
        citations: f64,
    ) -> PatentRecord {
        let mut r = PatentRecord::new(id);
        r.assignee = assignee.to_string();
        r.sector = sector.to_string();
        r.competitor_names = competitors.iter().map(|c| (*c).to_string()).collect();
        r.competitor_citations = citations;
        r.years_remaining = 10.0;
        r
    }

    fn ranking(ids: &[&str]) -> Vec<RankedEntry> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| RankedEntry {
                rank: i + 1,
                score: 1.0,
                patent: ScoredPatent {
                    patent_id: (*id).to_string(),
                    profiles: IndexMap::new(),
                    consensus_score: 1.0,
                },
            })
            .collect()
    }

    fn build(records: &[PatentRecord], order: &[&str]) -> SummaryTables {
        let options = SummaryConfig::default();
        let resolver = AffiliateResolver::with_builtins();
        SummaryBuilder::new(&options, &resolver).build("consensus", records, &ranking(order))
    }

    #[test]
    fn aliases_collapse_into_one_affiliate_row() {
        let records = vec![
            record("P1", "VMware, Inc.", "cloud-storage", &[], 1.0),
            record("P2", "vmware llc", "virtualization", &[], 5.0),
        ];
        let tables = build(&records, &["P1", "P2"]);

        assert_eq!(tables.affiliates.len(), 1);
        let row = &tables.affiliates[0];
        assert_eq!(row.affiliate, "VMware");
        assert_eq!(row.stats.count, 2);
        assert_eq!(row.sectors, vec!["cloud-storage", "virtualization"]);
        assert_eq!(row.top_cited.as_ref().map(|t| t.patent_id.as_str()), Some("P2"));
    }

    #[test]
    fn competitor_rows_count_each_patent_once() {
        let records = vec![
            record("P1", "A", "video-codec", &["Cisco", "Cisco", "Apple"], 3.0),
            record("P2", "A", "video-codec", &["Cisco"], 5.0),
            record("P3", "A", "video-codec", &["Apple", " "], 1.0),
        ];
        let tables = build(&records, &["P2", "P3", "P1"]);

        let names: Vec<&str> = tables.competitors.iter().map(|r| r.competitor.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Cisco"]);

        let cisco = &tables.competitors[1];
        assert_eq!(cisco.stats.count, 2);
        assert_eq!(cisco.stats.aggregate_citations, 8.0);
        assert_eq!(cisco.stats.min_rank, 1);
        assert_eq!(cisco.stats.max_rank, 3);
        assert_eq!(cisco.stats.median_rank, 2.0);
        assert_eq!(cisco.top_patents, vec!["P2", "P1"]);
    }

    #[test]
    fn sector_rows_track_competitors_and_affiliates() {
        let records = vec![
            record("P1", "Symantec Corporation", "network-threat-detection", &["Cisco"], 2.0),
            record("P2", "CA, Inc.", "network-threat-detection", &["Cisco", "Fortinet"], 4.0),
            record("P3", "Broadcom Inc.", "", &[], 0.0),
        ];
        let tables = build(&records, &["P1", "P2", "P3"]);

        let threat = &tables.sectors[0];
        assert_eq!(threat.sector, "network-threat-detection");
        assert_eq!(threat.super_sector, SuperSector::Security);
        assert_eq!(threat.unique_competitors, 2);
        assert_eq!(threat.affiliates, vec!["CA Technologies", "Symantec"]);
        assert_eq!(tables.sectors[1].sector, UNASSIGNED_SECTOR);
    }

    #[test]
    fn super_sector_keeps_top_sub_sectors_in_encounter_order() {
        let records = vec![
            record("P1", "A", "video-codec", &[], 0.0),
            record("P2", "A", "live-streaming", &[], 0.0),
            record("P3", "A", "broadcast", &[], 0.0),
            record("P4", "A", "transcoding", &[], 0.0),
            record("P5", "A", "live-streaming", &[], 0.0),
        ];
        let tables = build(&records, &["P1", "P2", "P3", "P4", "P5"]);

        assert_eq!(tables.super_sectors.len(), 1);
        let video = &tables.super_sectors[0];
        assert_eq!(video.display_name, "Video & Streaming");
        assert_eq!(video.sector_count, 4);
        let subs: Vec<(&str, usize)> = video
            .top_sub_sectors
            .iter()
            .map(|s| (s.sector.as_str(), s.count))
            .collect();
        assert_eq!(
            subs,
            vec![("live-streaming", 2), ("video-codec", 1), ("broadcast", 1)]
        );
    }

    #[test]
    fn empty_input_gives_empty_tables() {
        let tables = build(&[], &[]);
        assert!(tables.is_empty());
        assert_eq!(tables.rank_source, "consensus");
    }
}
