//! Data model for the scoring engine.
//!
//! [`PatentRecord`] is the imported input; [`ScoredPatent`] and
//! [`RankedEntry`] are what scoring and ranking produce from it.

pub mod lenient;
mod patent;
mod scored;

pub use patent::{PatentRecord, QualitySignals};
pub use scored::{ProfileScore, RankedEntry, ScoredPatent};
