//! CSV report generator.
//!
//! Emits the consensus ranking followed by the four summary tables, each
//! under a `#`-prefixed section heading, for spreadsheet import.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::error::Result;
use crate::pipeline::EngineResults;
use crate::summary::{GroupStats, TopCited};

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_report(&self, results: &EngineResults, config: &ReportConfig) -> Result<String> {
        let mut content = String::new();
        let records = results.record_index();

        // Consensus ranking
        content.push_str("# Consensus Ranking\n");
        content.push_str("Rank,Patent ID,Title,Assignee,Sector,Years Remaining,Consensus");
        for profile in &results.profiles {
            content.push(',');
            content.push_str(&quote(profile));
        }
        content.push('\n');

        let limit = config.row_limit(results.consensus_ranking.len());
        for entry in results.consensus_ranking.iter().take(limit) {
            let record = records.get(entry.patent_id());
            content.push_str(&format!(
                "{},{},{},{},{},{:.2},{:.6}",
                entry.rank,
                quote(entry.patent_id()),
                quote(record.map_or("", |r| r.title.as_str())),
                quote(record.map_or("", |r| r.assignee.as_str())),
                quote(record.map_or("", |r| r.sector.as_str())),
                record.map_or(0.0, |r| r.years_remaining),
                entry.score
            ));
            for profile in &results.profiles {
                let score = entry.patent.final_score(profile).unwrap_or_default();
                content.push_str(&format!(",{score:.6}"));
            }
            content.push('\n');
        }

        let summaries = &results.summaries;

        content.push_str("\n# Competitors\n");
        content.push_str(&format!("Competitor,{STATS_HEADER},Top Patents\n"));
        for row in &summaries.competitors {
            content.push_str(&format!(
                "{},{},{}\n",
                quote(&row.competitor),
                stats_fields(&row.stats),
                quote(&row.top_patents.join("; "))
            ));
        }

        content.push_str("\n# Affiliates\n");
        content.push_str(&format!(
            "Affiliate,{STATS_HEADER},Active,Avg Years Remaining,Top Cited,Sectors\n"
        ));
        for row in &summaries.affiliates {
            content.push_str(&format!(
                "{},{},{},{:.2},{},{}\n",
                quote(&row.affiliate),
                stats_fields(&row.stats),
                row.active_count,
                row.avg_years_remaining,
                quote(top_cited_id(row.top_cited.as_ref())),
                quote(&row.sectors.join("; "))
            ));
        }

        content.push_str("\n# Sectors\n");
        content.push_str(&format!(
            "Sector,Display Name,Super Sector,{STATS_HEADER},Active,Avg Years Remaining,Top Cited,Unique Competitors,Affiliates\n"
        ));
        for row in &summaries.sectors {
            content.push_str(&format!(
                "{},{},{},{},{},{:.2},{},{},{}\n",
                quote(&row.sector),
                quote(row.display_name.as_deref().unwrap_or("")),
                row.super_sector.code(),
                stats_fields(&row.stats),
                row.active_count,
                row.avg_years_remaining,
                quote(top_cited_id(row.top_cited.as_ref())),
                row.unique_competitors,
                quote(&row.affiliates.join("; "))
            ));
        }

        content.push_str("\n# Super Sectors\n");
        content.push_str(&format!(
            "Super Sector,Display Name,{STATS_HEADER},Sectors,Top Cited,Top Sub Sectors\n"
        ));
        for row in &summaries.super_sectors {
            let subs: Vec<String> = row
                .top_sub_sectors
                .iter()
                .map(|s| format!("{} ({})", s.sector, s.count))
                .collect();
            content.push_str(&format!(
                "{},{},{},{},{},{}\n",
                row.super_sector.code(),
                quote(&row.display_name),
                stats_fields(&row.stats),
                row.sector_count,
                quote(top_cited_id(row.top_cited.as_ref())),
                quote(&subs.join("; "))
            ));
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

const STATS_HEADER: &str = "Count,Avg Rank,Min Rank,Max Rank,Median Rank,Competitor Citations,Avg Citations,Forward Citations";

fn stats_fields(stats: &GroupStats) -> String {
    format!(
        "{},{:.2},{},{},{:.1},{},{:.2},{}",
        stats.count,
        stats.avg_rank,
        stats.min_rank,
        stats.max_rank,
        stats.median_rank,
        stats.aggregate_citations,
        stats.avg_citations_per_entry,
        stats.forward_citations
    )
}

fn top_cited_id(top: Option<&TopCited>) -> &str {
    top.map_or("", |t| t.patent_id.as_str())
}

/// Quote a field, doubling embedded quotes and flattening newlines.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\"").replace(['\n', '\r'], " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_results;

    #[test]
    fn test_sections_and_header() {
        let results = sample_results();
        let csv = CsvReporter::new()
            .generate_report(&results, &ReportConfig::default())
            .unwrap();

        for section in [
            "# Consensus Ranking",
            "# Competitors",
            "# Affiliates",
            "# Sectors",
            "# Super Sectors",
        ] {
            assert!(csv.contains(section), "missing {section}");
        }
        let header = csv.lines().nth(1).unwrap();
        assert!(header.starts_with("Rank,Patent ID,Title"));
        assert!(header.ends_with("\"executive\""));
        assert!(csv.contains("\"Threat telemetry, \"\"fast\"\"\""));
    }

    #[test]
    fn test_top_limits_ranking_rows() {
        let results = sample_results();
        let config = ReportConfig {
            top: Some(1),
            ..ReportConfig::default()
        };
        let csv = CsvReporter::new().generate_report(&results, &config).unwrap();
        let ranking_rows = csv
            .lines()
            .skip(2)
            .take_while(|line| !line.is_empty())
            .count();
        assert_eq!(ranking_rows, 1);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote("x\ny"), "\"x y\"");
    }
}
