//! CLI command handlers.
//!
//! Each handler implements one subcommand and is invoked by main.rs. The
//! handlers return the process exit code so they can be exercised in tests
//! without exiting.

mod classify;
mod compare;
mod config;
mod score;

pub use classify::{classify_labels, run_classify, SectorClassification};
pub use compare::run_compare;
pub use config::{run_config_init, run_config_schema, run_config_show, CONFIG_INIT_FILE};
pub use score::{count_at_or_above, run_score, ScoreArgs};

use crate::config::{load_config_file, load_or_default, EngineConfig, Validatable};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load the effective configuration and reject it early if validation fails.
///
/// An explicit path must exist and parse; otherwise discovery falls back to
/// the built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let (config, loaded_from) = load_or_default(None);
            if let Some(path) = loaded_from {
                tracing::info!(path = %path.display(), "using config file");
            }
            config
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let listing: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration:\n  {}", listing.join("\n  "));
    }
    Ok(config)
}
