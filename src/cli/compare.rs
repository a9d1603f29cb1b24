//! Compare command handler.
//!
//! Implements the `compare` subcommand: agreement between two ranking
//! columns (`consensus` or any profile) over one record set.

use crate::config::EngineConfig;
use crate::error::OptionContext;
use crate::pipeline::{
    exit_codes, load_records, write_output, OutputTarget, ScoringEngine, CONSENSUS,
};
use crate::ranking::RankingComparison;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the compare command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(
    records: PathBuf,
    left: String,
    right: String,
    json: bool,
    output_file: Option<PathBuf>,
    config: &EngineConfig,
    quiet: bool,
) -> Result<i32> {
    let engine = ScoringEngine::from_config(config).context("invalid scoring configuration")?;
    let results = engine.compute(load_records(&records, quiet)?);

    let comparison = results.compare(&left, &right).with_context_none(|| {
        let mut known = vec![CONSENSUS.to_string()];
        known.extend(results.profiles.iter().cloned());
        format!(
            "Unknown ranking column in '{left}' / '{right}'. Valid options: {}",
            known.join(", ")
        )
    })?;

    let content = if json {
        serde_json::to_string_pretty(&comparison).context("failed to serialize comparison")?
    } else {
        render_comparison(&comparison)
    };
    write_output(&content, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn render_comparison(cmp: &RankingComparison) -> String {
    let mut lines = vec![
        format!("{} vs {}", cmp.left, cmp.right),
        format!("  common patents: {}", cmp.common),
        format!("  spearman:       {:+.4}", cmp.spearman),
    ];
    if cmp.overlaps.is_empty() {
        lines.push("  top-N overlap:  n/a".to_string());
    } else {
        lines.push("  top-N overlap:".to_string());
        for overlap in &cmp.overlaps {
            lines.push(format!(
                "    top {:>4}: {:>4} shared ({:.1}%)",
                overlap.cutoff,
                overlap.shared,
                overlap.fraction() * 100.0
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::TopOverlap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_comparison() {
        let cmp = RankingComparison {
            left: "licensing".to_string(),
            right: CONSENSUS.to_string(),
            common: 30,
            spearman: 0.91234,
            overlaps: vec![TopOverlap { cutoff: 25, shared: 20 }],
        };
        let text = render_comparison(&cmp);
        assert!(text.starts_with("licensing vs consensus"));
        assert!(text.contains("+0.9123"));
        assert!(text.contains("top   25:   20 shared (80.0%)"));
    }

    #[test]
    fn test_run_compare_unknown_column() {
        let mut input = NamedTempFile::new().unwrap();
        input
            .write_all(br#"[{"patentId": "US1"}, {"patentId": "US2"}]"#)
            .unwrap();
        let err = run_compare(
            input.path().to_path_buf(),
            "licensing".to_string(),
            "no-such-profile".to_string(),
            false,
            None,
            &EngineConfig::default(),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Valid options: consensus"));
    }

    #[test]
    fn test_run_compare_json_to_file() {
        let mut input = NamedTempFile::new().unwrap();
        input
            .write_all(br#"[{"patentId": "US1", "competitorCitations": 9}, {"patentId": "US2"}]"#)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cmp.json");
        let code = run_compare(
            input.path().to_path_buf(),
            "licensing".to_string(),
            CONSENSUS.to_string(),
            true,
            Some(out.clone()),
            &EngineConfig::default(),
            true,
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let cmp: RankingComparison =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(cmp.common, 2);
        assert!((cmp.spearman - 1.0).abs() < 1e-12);
    }
}
