//! Domain types shared across Dominion crates.

pub mod filter;
pub mod session;
pub mod stats;

pub use filter::FilterCriterion;
pub use session::{SessionRecord, SessionUser};
pub use stats::{GeoBucket, SessionStatsSnapshot};
