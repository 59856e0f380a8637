//! Single-pass session stats reduction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use dominion_core::types::session::SessionRecord;
use dominion_core::types::stats::SessionStatsSnapshot;

use crate::activity::ActivityWindow;

/// The marker token distinguishing Termux (Android terminal) sessions
/// from desktop Linux ones.
const TERMUX_MARKER: &str = "termux";

/// Whether a record is a Termux session: either the `distro` or the
/// `terminal` field contains the marker, case-insensitively. Any field
/// matching wins; anything else, including absent fields, is Linux.
fn is_termux(record: &SessionRecord) -> bool {
    let matches = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(TERMUX_MARKER))
    };
    matches(&record.distro) || matches(&record.terminal)
}

/// Derive summary counters from a filtered session batch in one pass.
///
/// Liveness uses the last observed activity, falling back to the session
/// start for records with no activity recorded. Empty input yields an
/// all-zero snapshot; that is the defined behavior, not an error. Pure
/// and idempotent.
pub fn compute_stats(
    records: &[SessionRecord],
    now: DateTime<Utc>,
    window: ActivityWindow,
) -> SessionStatsSnapshot {
    let mut snapshot = SessionStatsSnapshot::default();
    let mut countries: HashSet<&str> = HashSet::new();

    for record in records {
        if is_termux(record) {
            snapshot.termux_count += 1;
        } else {
            snapshot.linux_count += 1;
        }

        if record.is_vpn {
            snapshot.vpn_count += 1;
        }

        if let Some(code) = record.country_code.as_deref() {
            countries.insert(code);
        }

        if window.record_is_live(record, now) {
            snapshot.live_count += 1;
        }
    }

    snapshot.distinct_countries = countries.len() as u64;
    snapshot
}
