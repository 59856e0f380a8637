//! Render sink trait.

use crate::types::session::SessionRecord;
use crate::types::stats::{GeoBucket, SessionStatsSnapshot};

/// Presentation-side consumer of one refresh cycle's derived output.
///
/// A call to [`RenderSink::render`] applies the whole cycle result
/// atomically; a sink never observes a partially applied cycle. Failed
/// cycles simply never reach the sink, so the previous successful render
/// stays visible.
pub trait RenderSink: Send + Sync + 'static {
    /// Apply one cycle's stats, geo buckets, and session rows.
    fn render(
        &self,
        stats: &SessionStatsSnapshot,
        buckets: &[GeoBucket],
        records: &[SessionRecord],
    );
}
