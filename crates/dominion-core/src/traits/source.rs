//! Session data source trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::filter::FilterCriterion;
use crate::types::session::SessionRecord;

/// Abstracts the query-and-transport layer to the hosted session backend.
///
/// Implementations return a bounded, newest-first batch. Transport or
/// query failures surface as [`crate::error::ErrorKind::DataSource`]
/// errors and are recovered at the refresh-cycle boundary, never inside
/// the pure aggregation stages.
#[async_trait]
pub trait SessionSource: Send + Sync + 'static {
    /// Fetch up to `limit` session records matching `filter`, ordered
    /// newest-first. An empty batch is a valid result, not an error.
    async fn fetch_sessions(
        &self,
        filter: FilterCriterion,
        limit: u32,
    ) -> AppResult<Vec<SessionRecord>>;
}
