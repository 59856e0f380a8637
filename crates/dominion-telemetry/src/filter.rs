//! Multi-criteria session filtering.

use chrono::{DateTime, NaiveTime, Utc};

use dominion_core::types::filter::FilterCriterion;
use dominion_core::types::session::SessionRecord;

/// Apply the active criterion to a session batch, producing a filtered
/// view without mutating the source. Relative order is always preserved.
///
/// The `Today` boundary is midnight of `now`'s calendar day; the caller's
/// clock supplies the day boundary (timezone handling stays with the
/// caller, it is not re-derived here).
pub fn filter_sessions(
    records: &[SessionRecord],
    criterion: FilterCriterion,
    now: DateTime<Utc>,
) -> Vec<SessionRecord> {
    match criterion {
        FilterCriterion::All => records.to_vec(),
        FilterCriterion::Today => {
            let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            records
                .iter()
                .filter(|r| r.created_at >= midnight)
                .cloned()
                .collect()
        }
        FilterCriterion::PastWeek => {
            let week_ago = now - chrono::Duration::days(7);
            records
                .iter()
                .filter(|r| r.created_at >= week_ago)
                .cloned()
                .collect()
        }
        FilterCriterion::VpnOnly => records.iter().filter(|r| r.is_vpn).cloned().collect(),
    }
}
