//! **Scoring, ranking and grouped summaries for patent portfolios.**
//!
//! `ipport` turns a batch of imported patent records into per-profile
//! scores, a weighted consensus score, rank tables, and grouped summaries
//! by competitor, affiliate, sector and super-sector. It powers both a
//! command-line tool and a library for embedding in larger pipelines.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`PatentRecord`] (the input) and the scored and ranked
//!   shapes produced from it.
//! - **[`scoring`]**: metric normalization, weight profiles, the remaining-term
//!   multiplier and the consensus blend.
//! - **[`ranking`]**: deterministic rank tables, ranking comparisons
//!   (Spearman, top-N overlap) and score distributions.
//! - **[`summary`]**: the super-sector classifier, affiliate alias resolution
//!   and the four summary tables.
//! - **[`config`]**: [`EngineConfig`], defaults, presets, YAML loading and
//!   validation.
//! - **[`pipeline`]**: [`ScoringEngine`], which runs one batch end to end.
//! - **[`reports`]**: JSON, CSV, summary and table output.
//!
//! ## Getting Started
//!
//! ```no_run
//! use ipport::{EngineConfig, ScoringEngine};
//! use ipport::pipeline::load_records;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = ScoringEngine::from_config(&EngineConfig::default())?;
//!     let records = load_records(Path::new("portfolio.json"), false)?;
//!     let results = engine.compute(records);
//!
//!     for entry in results.consensus_ranking.iter().take(10) {
//!         println!("{:>3}. {} {:.4}", entry.rank, entry.patent_id(), entry.score);
//!     }
//!     for row in &results.summaries.super_sectors {
//!         println!("{}: {} patents", row.display_name, row.stats.count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Explicit Profiles
//!
//! The [`compute`] function takes profiles and consensus weights directly:
//!
//! ```
//! use ipport::model::PatentRecord;
//! use ipport::scoring::{ConsensusWeights, WeightProfile};
//! use indexmap::IndexMap;
//!
//! let profile = WeightProfile::from_array(
//!     "citations",
//!     [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
//! )?;
//! let mut weights = IndexMap::new();
//! weights.insert("citations".to_string(), 1.0);
//! let consensus = ConsensusWeights::resolve(&weights, ["citations"], false)?;
//!
//! let mut record = PatentRecord::new("US1");
//! record.competitor_citations = 15.0;
//! record.years_remaining = 15.0;
//!
//! let results = ipport::compute(vec![record], &[profile], &consensus)?;
//! assert!((results.consensus_ranking[0].score - 0.5).abs() < 1e-12);
//! # Ok::<(), ipport::IpPortError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts feed averages and normalization caps; all values are small in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod ranking;
pub mod reports;
pub mod scoring;
pub mod summary;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigPreset, ConfigSnapshot, EngineConfig, Validatable};
pub use error::{ErrorContext, IpPortError, OptionContext, Result};
pub use model::{PatentRecord, ProfileScore, RankedEntry, ScoredPatent};
pub use pipeline::{compute, EngineResults, ScoringEngine};
pub use ranking::{RankSource, Ranker, RankingComparison, ScoreDistribution};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{ConsensusWeights, WeightProfile};
pub use summary::{AffiliateResolver, SummaryTables, SuperSector};
