//! Record loading for the command line.

use crate::error::{ErrorContext, IpPortError, LoadErrorKind, Result};
use crate::model::PatentRecord;
use std::path::Path;

/// Parse a JSON array of patent records.
pub fn parse_records(content: &str) -> Result<Vec<PatentRecord>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(IpPortError::load("record set", LoadErrorKind::NotAnArray));
    }
    let records: Vec<PatentRecord> = serde_json::from_value(value)?;
    Ok(records)
}

/// Read and parse a record file.
pub fn load_records(path: &Path, quiet: bool) -> Result<Vec<PatentRecord>> {
    if !quiet {
        tracing::info!("Loading records: {}", path.display());
    }

    let content = std::fs::read_to_string(path).map_err(|e| IpPortError::io(path, e))?;
    let records =
        parse_records(&content).with_context(|| format!("reading {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} records", records.len());
    }
    Ok(records)
}
