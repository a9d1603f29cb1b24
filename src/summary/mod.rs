//! Grouped summaries over a ranked patent set.
//!
//! Each run produces four tables keyed by competitor, canonical affiliate,
//! raw sector and super-sector. All four are rebuilt from scratch from the
//! records and one ranking; nothing is updated incrementally.

mod affiliate;
mod classifier;
mod stats;
mod tables;

pub use affiliate::{builtin_aliases, normalize_assignee, AffiliateResolver, UNKNOWN_AFFILIATE};
pub use classifier::{normalize_label, SectorRule, SuperSector, SECTOR_RULES};
pub use stats::{median, GroupAccumulator, GroupStats, RankStats, TopCited};
pub use tables::{
    sector_key, AffiliateRow, CompetitorRow, SectorRow, SubSectorCount, SummaryBuilder,
    SummaryTables, SuperSectorRow, UNASSIGNED_SECTOR,
};
