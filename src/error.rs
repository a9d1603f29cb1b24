//! Unified error types for ipport.
//!
//! The engine itself only fails on malformed configuration; everything else
//! here serves loading, reporting and the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ipport operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IpPortError {
    /// Malformed weight-profile or summary configuration
    #[error("Invalid configuration: {context}")]
    Config {
        context: String,
        #[source]
        source: ConfigErrorKind,
    },

    /// Errors while loading a record set
    #[error("Failed to load records: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific configuration error kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    #[error("No weight profiles configured")]
    NoProfiles,

    #[error("Profile '{profile}' is missing weight slot '{metric}'")]
    MissingWeight { profile: String, metric: String },

    #[error("Profile '{profile}' has invalid weight {value} for '{metric}'")]
    InvalidWeight {
        profile: String,
        metric: String,
        value: f64,
    },

    #[error("Duplicate profile name: {0}")]
    DuplicateProfile(String),

    #[error("Consensus weight refers to unknown profile '{0}'")]
    UnknownConsensusProfile(String),

    #[error("Profile '{0}' has no consensus weight")]
    MissingConsensusWeight(String),

    #[error("Consensus weight for '{profile}' is invalid: {value}")]
    InvalidConsensusWeight { profile: String, value: f64 },

    #[error("Consensus weights sum to zero and cannot be renormalized")]
    ZeroConsensusTotal,

    #[error("Summary rank source '{0}' is not a configured profile")]
    UnknownRankSource(String),

    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

/// Specific record-loading error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array of patent records")]
    NotAnArray,
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for ipport operations
pub type Result<T> = std::result::Result<T, IpPortError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl IpPortError {
    /// Create a configuration error with context
    pub fn config(context: impl Into<String>, source: ConfigErrorKind) -> Self {
        Self::Config {
            context: context.into(),
            source,
        }
    }

    /// Create a missing-weight configuration error
    pub fn missing_weight(profile: impl Into<String>, metric: impl Into<String>) -> Self {
        let profile = profile.into();
        Self::config(
            format!("profile '{profile}'"),
            ConfigErrorKind::MissingWeight {
                profile,
                metric: metric.into(),
            },
        )
    }

    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Whether this error came from configuration rather than data or IO.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for IpPortError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for IpPortError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for IpPortError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(
            "YAML deserialization",
            ConfigErrorKind::Invalid {
                field: "<file>".to_string(),
                message: err.to_string(),
            },
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so a failure three layers deep reads
/// `"outer: middle: inner"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<IpPortError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: IpPortError, new_ctx: &str) -> IpPortError {
    match err {
        IpPortError::Config {
            context: existing,
            source,
        } => IpPortError::Config {
            context: chain_context(new_ctx, &existing),
            source,
        },
        IpPortError::Load {
            context: existing,
            source,
        } => IpPortError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        IpPortError::Report {
            context: existing,
            source,
        } => IpPortError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        IpPortError::Io {
            path,
            message,
            source,
        } => IpPortError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        IpPortError::Validation(msg) => IpPortError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| IpPortError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| IpPortError::Validation(f().into()))
    }
}
