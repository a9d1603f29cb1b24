//! Configuration for scoring runs.
//!
//! This module provides:
//! - Weight profiles, consensus weights, affiliate aliases and summary options
//! - The six reference profiles and named consensus presets
//! - YAML config file loading and discovery
//! - Validation, and a frozen [`ConfigSnapshot`] for each run
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ipport::config::{ConfigPreset, EngineConfig};
//!
//! // Use defaults
//! let config = EngineConfig::default();
//!
//! // Use a preset
//! let config = EngineConfig::from_preset(ConfigPreset::Litigation);
//!
//! // Use builder
//! let config = EngineConfig::builder()
//!     .preset(ConfigPreset::Licensing)
//!     .renormalize(true)
//!     .top_n(10)
//!     .build();
//!
//! // Freeze for a run
//! let snapshot = config.snapshot()?;
//! # Ok::<(), ipport::IpPortError>(())
//! ```
//!
//! # Configuration File
//!
//! Place a `.ipport.yaml` file in the working directory or `~/.config/ipport/`:
//!
//! ```yaml
//! consensus:
//!   renormalize: true
//! summary:
//!   top_n: 10
//!   rank_by: licensing
//! ```

mod defaults;
pub mod file;
mod snapshot;
mod types;
mod validation;

pub use defaults::{
    default_consensus_weights, default_profiles, ConfigPreset, DEFAULT_ACTIVE_YEARS,
    DEFAULT_TOP_N, DEFAULT_TOP_SUB_SECTORS,
};
pub use snapshot::ConfigSnapshot;
pub use types::{
    ConsensusConfig, EngineConfig, EngineConfigBuilder, SummaryConfig, WeightProfileConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `EngineConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of `.ipport.yaml`.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(EngineConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
