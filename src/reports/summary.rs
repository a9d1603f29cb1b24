//! Terminal reporters: a compact summary and an aligned ranking table.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::error::Result;
use crate::pipeline::{EngineResults, CONSENSUS};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_report(&self, results: &EngineResults, config: &ReportConfig) -> Result<String> {
        let mut lines = Vec::new();

        lines.push(self.color("Patent Portfolio Scoring", "bold"));
        lines.push(format!(
            "{} records | {} profiles | config {}",
            results.record_count,
            results.profiles.len(),
            results.config_fingerprint
        ));
        if !results.data_quality.is_empty() {
            lines.push(self.color(
                &format!("{} data-quality issues (see JSON output)", results.data_quality.len()),
                "yellow",
            ));
        }

        if results.consensus_ranking.is_empty() {
            lines.push(String::new());
            lines.push(self.color("No records to score.", "dim"));
            return Ok(lines.join("\n"));
        }

        lines.push(String::new());
        lines.push(self.color("Top patents (consensus):", "bold"));
        let records = results.record_index();
        for entry in results.consensus_ranking.iter().take(config.row_limit(10)) {
            let title = records
                .get(entry.patent_id())
                .map_or("", |r| r.title.as_str());
            lines.push(format!(
                "  {:>3}. {}  {}  {}",
                entry.rank,
                self.color(entry.patent_id(), "cyan"),
                self.color(&format!("{:.4}", entry.score), "green"),
                truncate(title, 50)
            ));
        }

        if !results.comparisons.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Agreement with consensus (Spearman):", "bold"));
            for cmp in &results.comparisons {
                let rho = format!("{:+.3}", cmp.spearman);
                let colored = if cmp.spearman >= 0.8 {
                    self.color(&rho, "green")
                } else if cmp.spearman >= 0.5 {
                    self.color(&rho, "yellow")
                } else {
                    self.color(&rho, "red")
                };
                lines.push(format!("  {}  {colored}", pad(&cmp.left, 22)));
            }
        }

        let summaries = &results.summaries;
        lines.push(String::new());
        lines.push(self.color(
            &format!("Super-sectors (ranked by {}):", summaries.rank_source),
            "bold",
        ));
        for row in &summaries.super_sectors {
            let subs: Vec<&str> = row.top_sub_sectors.iter().map(|s| s.sector.as_str()).collect();
            lines.push(format!(
                "  {} {:>5} patents  avg rank {:>7.1}  {}",
                pad(&row.display_name, 22),
                row.stats.count,
                row.stats.avg_rank,
                self.color(&subs.join(", "), "dim")
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Affiliates:", "bold"));
        for row in summaries.affiliates.iter().take(5) {
            lines.push(format!(
                "  {} {:>5} patents  {:>5} active  median rank {:>7.1}",
                pad(&truncate(&row.affiliate, 30), 30),
                row.stats.count,
                row.active_count,
                row.stats.median_rank
            ));
        }

        if !summaries.competitors.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Most-citing competitors:", "bold"));
            for row in summaries.competitors.iter().take(5) {
                lines.push(format!(
                    "  {} {:>5} patents  {:>7} citations",
                    pad(&truncate(&row.competitor, 30), 30),
                    row.stats.count,
                    row.stats.aggregate_citations
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

const PROFILE_COLUMN: usize = 10;

impl ReportGenerator for TableReporter {
    fn generate_report(&self, results: &EngineResults, config: &ReportConfig) -> Result<String> {
        let mut lines = Vec::new();
        let records = results.record_index();

        let mut header = format!(
            "{} {} {} {} {}",
            pad("RANK", 5),
            pad("PATENT", 14),
            pad("TITLE", 36),
            pad("SECTOR", 26),
            pad(CONSENSUS, PROFILE_COLUMN)
        );
        for profile in &results.profiles {
            header.push(' ');
            header.push_str(&pad(&truncate(profile, PROFILE_COLUMN), PROFILE_COLUMN));
        }
        let rule_width = UnicodeWidthStr::width(header.as_str());
        lines.push(self.color(header.trim_end(), "bold"));
        lines.push("─".repeat(rule_width));

        let limit = config.row_limit(50);
        for entry in results.consensus_ranking.iter().take(limit) {
            let record = records.get(entry.patent_id());
            let mut line = format!(
                "{} {} {} {} {}",
                pad(&entry.rank.to_string(), 5),
                pad(&truncate(entry.patent_id(), 14), 14),
                pad(&truncate(record.map_or("", |r| r.title.as_str()), 36), 36),
                pad(&truncate(record.map_or("", |r| r.sector.as_str()), 26), 26),
                self.color(&pad(&format!("{:.4}", entry.score), PROFILE_COLUMN), "green")
            );
            for profile in &results.profiles {
                let score = entry.patent.final_score(profile).unwrap_or_default();
                line.push(' ');
                line.push_str(&pad(&format!("{score:.4}"), PROFILE_COLUMN));
            }
            lines.push(line.trim_end().to_string());
        }

        let total = results.consensus_ranking.len();
        if total > limit {
            lines.push(self.color(&format!("... and {} more patents", total - limit), "dim"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} patents | {} sectors | {} affiliates | {} competitors | {} data-quality issues",
            results.record_count,
            results.summaries.sectors.len(),
            results.summaries.affiliates.len(),
            results.summaries.competitors.len(),
            results.data_quality.len()
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Left-align `s` in a column of `width` display cells.
fn pad(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    if used >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - used))
    }
}

/// Truncate to at most `max_width` display cells, marking the cut with `…`.
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
