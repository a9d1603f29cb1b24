//! Configuration validation.
//!
//! `validate()` collects every problem it can find so `config show` can
//! list them together. Building a snapshot stops at the first one.

use super::types::{ConsensusConfig, EngineConfig, SummaryConfig, WeightProfileConfig};
use crate::scoring::{ConsensusWeights, WeightVector};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for EngineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.profiles.is_empty() {
            errors.push(ConfigError::new("profiles", "at least one profile is required"));
        }

        let mut seen = HashSet::new();
        for (i, profile) in self.profiles.iter().enumerate() {
            errors.extend(
                profile
                    .validate()
                    .into_iter()
                    .map(|e| ConfigError::new(format!("profiles[{i}].{}", e.field), e.message)),
            );
            if !seen.insert(profile.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("profiles[{i}].name"),
                    format!("duplicate profile name '{}'", profile.name),
                ));
            }
        }

        errors.extend(validate_consensus(&self.consensus, self));
        errors.extend(self.summary.validate());

        if let Some(rank_by) = &self.summary.rank_by {
            if self.profile(rank_by).is_none() {
                errors.push(ConfigError::new(
                    "summary.rank_by",
                    format!("'{rank_by}' is not a configured profile"),
                ));
            }
        }

        for (canonical, aliases) in &self.affiliates {
            if canonical.trim().is_empty() {
                errors.push(ConfigError::new("affiliates", "canonical name must not be blank"));
            }
            if aliases.iter().any(|a| a.trim().is_empty()) {
                errors.push(ConfigError::new(
                    format!("affiliates.{canonical}"),
                    "aliases must not be blank",
                ));
            }
        }

        errors
    }
}

impl Validatable for WeightProfileConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("name", "profile name must not be blank"));
        }
        if let Err(e) = WeightVector::from_slots(&self.name, &self.weights) {
            errors.push(ConfigError::new("weights", error_detail(&e)));
        }
        errors
    }
}

impl Validatable for SummaryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.active_years_threshold.is_finite() || self.active_years_threshold < 0.0 {
            errors.push(ConfigError::new(
                "summary.active_years_threshold",
                format!(
                    "must be a non-negative number, got {}",
                    self.active_years_threshold
                ),
            ));
        }
        if self.top_sub_sectors == 0 {
            errors.push(ConfigError::new("summary.top_sub_sectors", "must be at least 1"));
        }
        errors
    }
}

fn validate_consensus(consensus: &ConsensusConfig, config: &EngineConfig) -> Vec<ConfigError> {
    if config.profiles.is_empty() {
        return Vec::new();
    }
    match ConsensusWeights::resolve(
        &consensus.weights,
        config.profile_names(),
        consensus.renormalize,
    ) {
        Ok(_) => Vec::new(),
        Err(e) => vec![ConfigError::new("consensus.weights", error_detail(&e))],
    }
}

/// The innermost message of an error, without the outer context.
fn error_detail(err: &crate::error::IpPortError) -> String {
    std::error::Error::source(err).map_or_else(|| err.to_string(), ToString::to_string)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightSlots;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_missing_weight_slot_reported() {
        let mut config = EngineConfig::default();
        config.profiles[0].weights.ipr_risk = None;

        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "profiles[0].weights");
        assert!(errors[0].message.contains("ipr_risk"), "{}", errors[0]);
    }

    #[test]
    fn test_duplicate_profile_and_unknown_rank_source() {
        let mut config = EngineConfig::default();
        let mut copy = config.profiles[1].clone();
        copy.name = config.profiles[0].name.clone();
        config.profiles[1] = copy;
        config.summary.rank_by = Some("nobody".to_string());

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"profiles[1].name".to_string()), "{fields:?}");
        assert!(fields.contains(&"summary.rank_by".to_string()), "{fields:?}");
        // consensus still names the now-missing second profile
        assert!(fields.contains(&"consensus.weights".to_string()), "{fields:?}");
    }

    #[test]
    fn test_summary_config_validation() {
        let invalid = SummaryConfig {
            active_years_threshold: -1.0,
            top_sub_sectors: 0,
            ..SummaryConfig::default()
        };
        assert_eq!(invalid.validate().len(), 2);
    }

    #[test]
    fn test_empty_profiles_reported_once() {
        let config = EngineConfig {
            profiles: Vec::new(),
            ..EngineConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "profiles");
    }

    #[test]
    fn test_blank_profile_name() {
        let profile = WeightProfileConfig {
            name: " ".to_string(),
            description: None,
            weights: WeightSlots::from_array([0.1; 10]),
        };
        assert_eq!(profile.validate().len(), 1);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("summary.top_sub_sectors", "must be at least 1");
        assert_eq!(err.to_string(), "summary.top_sub_sectors: must be at least 1");
    }
}
