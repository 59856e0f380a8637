//! End-to-end refresh pipeline tests against mock collaborators.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use dominion_core::config::telemetry::TelemetryConfig;
use dominion_core::error::{AppError, ErrorKind};
use dominion_core::result::AppResult;
use dominion_core::traits::sink::RenderSink;
use dominion_core::traits::source::SessionSource;
use dominion_core::types::filter::FilterCriterion;
use dominion_core::types::session::SessionRecord;
use dominion_core::types::stats::{GeoBucket, SessionStatsSnapshot};
use dominion_telemetry::monitor::SessionMonitor;

/// Scripted session source: pops one queued response per fetch and
/// records the criteria it was asked for.
struct ScriptedSource {
    responses: Mutex<VecDeque<AppResult<Vec<SessionRecord>>>>,
    seen_filters: Mutex<Vec<FilterCriterion>>,
}

impl ScriptedSource {
    fn new(responses: Vec<AppResult<Vec<SessionRecord>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen_filters: Mutex::new(Vec::new()),
        }
    }

    fn seen_filters(&self) -> Vec<FilterCriterion> {
        self.seen_filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionSource for ScriptedSource {
    async fn fetch_sessions(
        &self,
        filter: FilterCriterion,
        _limit: u32,
    ) -> AppResult<Vec<SessionRecord>> {
        self.seen_filters.lock().unwrap().push(filter);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::data_source("script exhausted")))
    }
}

/// Captures the last rendered view and counts render calls.
#[derive(Default)]
struct CapturingSink {
    renders: Mutex<Vec<(SessionStatsSnapshot, Vec<GeoBucket>, usize)>>,
}

impl CapturingSink {
    fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }

    fn last(&self) -> Option<(SessionStatsSnapshot, Vec<GeoBucket>, usize)> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl RenderSink for CapturingSink {
    fn render(
        &self,
        stats: &SessionStatsSnapshot,
        buckets: &[GeoBucket],
        records: &[SessionRecord],
    ) {
        self.renders
            .lock()
            .unwrap()
            .push((*stats, buckets.to_vec(), records.len()));
    }
}

fn record(age_minutes: i64, country: Option<&str>, is_vpn: bool) -> SessionRecord {
    let created_at: DateTime<Utc> = Utc::now() - chrono::Duration::minutes(age_minutes);
    SessionRecord {
        id: Uuid::new_v4(),
        user: None,
        created_at,
        last_activity: Some(created_at),
        country_code: country.map(String::from),
        country: None,
        city: None,
        distro: Some("Kali Linux".to_string()),
        os_name: None,
        terminal: None,
        public_ip: None,
        is_vpn,
    }
}

fn config() -> TelemetryConfig {
    TelemetryConfig {
        activity_window_minutes: 15,
        refresh_interval_seconds: 30,
        fetch_limit: 100,
        geo_fetch_limit: 1000,
        geo_top_n: 10,
    }
}

fn monitor_with(
    source: Arc<ScriptedSource>,
    sink: Arc<CapturingSink>,
) -> Arc<SessionMonitor> {
    Arc::new(SessionMonitor::new(source, sink, config()))
}

#[tokio::test]
async fn refresh_cycle_renders_derived_view() {
    let batch = vec![
        record(5, Some("ES"), true),
        record(10, Some("ES"), false),
        record(60, Some("MX"), false),
        record(90, None, false),
    ];
    let source = Arc::new(ScriptedSource::new(vec![Ok(batch)]));
    let sink = Arc::new(CapturingSink::default());
    let monitor = monitor_with(Arc::clone(&source), Arc::clone(&sink));

    monitor.refresh_cycle(FilterCriterion::All).await.unwrap();

    let (stats, buckets, row_count) = sink.last().unwrap();
    assert_eq!(row_count, 4);
    assert_eq!(stats.live_count, 2);
    assert_eq!(stats.vpn_count, 1);
    assert_eq!(stats.distinct_countries, 2);
    assert_eq!(stats.linux_count, 4);
    assert_eq!(buckets[0], GeoBucket { label: "ES".to_string(), count: 2 });
    assert_eq!(buckets[1], GeoBucket { label: "MX".to_string(), count: 1 });
}

#[tokio::test]
async fn vpn_filter_narrows_locally_too() {
    let batch = vec![
        record(5, Some("ES"), false),
        record(6, Some("CL"), true),
        record(7, Some("MX"), false),
        record(8, None, true),
    ];
    let source = Arc::new(ScriptedSource::new(vec![Ok(batch)]));
    let sink = Arc::new(CapturingSink::default());
    let monitor = monitor_with(Arc::clone(&source), Arc::clone(&sink));

    monitor
        .refresh_cycle(FilterCriterion::VpnOnly)
        .await
        .unwrap();

    assert_eq!(source.seen_filters(), vec![FilterCriterion::VpnOnly]);
    let (stats, _, row_count) = sink.last().unwrap();
    assert_eq!(row_count, 2);
    assert_eq!(stats.vpn_count, 2);
}

#[tokio::test]
async fn failed_fetch_retains_previous_view() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(vec![record(3, Some("ES"), false)]),
        Err(AppError::data_source("backend unreachable")),
    ]));
    let sink = Arc::new(CapturingSink::default());
    let monitor = monitor_with(Arc::clone(&source), Arc::clone(&sink));

    monitor.refresh_cycle(FilterCriterion::All).await.unwrap();
    assert_eq!(sink.render_count(), 1);
    let first = sink.last().unwrap();

    let err = monitor.refresh_current().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DataSource);

    // The failed cycle never reached the sink.
    assert_eq!(sink.render_count(), 1);
    assert_eq!(sink.last().unwrap().0, first.0);
}

#[tokio::test]
async fn refresh_current_reuses_last_filter() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![]), Ok(vec![])]));
    let sink = Arc::new(CapturingSink::default());
    let monitor = monitor_with(Arc::clone(&source), Arc::clone(&sink));

    monitor
        .refresh_cycle(FilterCriterion::PastWeek)
        .await
        .unwrap();
    monitor.refresh_current().await.unwrap();

    assert_eq!(
        source.seen_filters(),
        vec![FilterCriterion::PastWeek, FilterCriterion::PastWeek]
    );

    // Empty batches render an all-zero snapshot; not an error.
    let (stats, buckets, row_count) = sink.last().unwrap();
    assert_eq!(stats, SessionStatsSnapshot::default());
    assert!(buckets.is_empty());
    assert_eq!(row_count, 0);
}

#[tokio::test(start_paused = true)]
async fn auto_refresh_polls_on_cadence_and_stops() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![]), Ok(vec![]), Ok(vec![])]));
    let sink = Arc::new(CapturingSink::default());
    let monitor = monitor_with(Arc::clone(&source), Arc::clone(&sink));

    monitor.start_auto_refresh(FilterCriterion::All).await;
    assert!(monitor.is_auto_refreshing().await);

    // No eager cycle on start.
    tokio::task::yield_now().await;
    assert_eq!(sink.render_count(), 0);

    tokio::time::advance(Duration::from_secs(30)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(sink.render_count(), 1);

    tokio::time::advance(Duration::from_secs(30)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(sink.render_count(), 2);

    monitor.stop_auto_refresh().await;
    assert!(!monitor.is_auto_refreshing().await);

    tokio::time::advance(Duration::from_secs(120)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(sink.render_count(), 2);
}
