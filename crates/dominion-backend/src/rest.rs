//! REST session source over the hosted backend.
//!
//! The backend exposes the `cli_sessions` table through a PostgREST-style
//! interface: filters are query parameters of the form
//! `column=op.value`, embedded joins are named in `select`, and auth is
//! an `apikey` header plus bearer authorization.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use reqwest::Client;

use dominion_core::config::backend::BackendConfig;
use dominion_core::error::AppError;
use dominion_core::result::AppResult;
use dominion_core::traits::source::SessionSource;
use dominion_core::types::filter::FilterCriterion;
use dominion_core::types::session::SessionRecord;

const SESSIONS_TABLE: &str = "cli_sessions";
const SELECT_CLAUSE: &str = "*,cli_users(email,username)";

/// [`SessionSource`] implementation querying the hosted backend.
#[derive(Debug, Clone)]
pub struct RestSessionSource {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestSessionSource {
    /// Build a source from backend settings.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, SESSIONS_TABLE)
    }
}

/// Translate a filter criterion into backend query parameters.
///
/// `Today` and `PastWeek` become `created_at=gte.<iso>` clauses computed
/// from `now`; `VpnOnly` becomes `is_vpn=eq.true`; `All` adds nothing.
fn criterion_params(criterion: FilterCriterion, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
    match criterion {
        FilterCriterion::All => Vec::new(),
        FilterCriterion::Today => {
            let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            vec![("created_at", format!("gte.{}", midnight.to_rfc3339()))]
        }
        FilterCriterion::PastWeek => {
            let week_ago = now - chrono::Duration::days(7);
            vec![("created_at", format!("gte.{}", week_ago.to_rfc3339()))]
        }
        FilterCriterion::VpnOnly => vec![("is_vpn", "eq.true".to_string())],
    }
}

#[async_trait]
impl SessionSource for RestSessionSource {
    async fn fetch_sessions(
        &self,
        filter: FilterCriterion,
        limit: u32,
    ) -> AppResult<Vec<SessionRecord>> {
        let mut params: Vec<(&str, String)> = vec![
            ("select", SELECT_CLAUSE.to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        params.extend(criterion_params(filter, Utc::now()));

        tracing::debug!(filter = %filter, limit, "Querying session backend");

        let response = self
            .http
            .get(self.table_url())
            .query(&params)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::data_source(format!(
                "Backend query failed with status {status}"
            )));
        }

        let records = response.json::<Vec<SessionRecord>>().await?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-28T10:30:00Z".parse().unwrap()
    }

    #[test]
    fn test_all_adds_no_clause() {
        assert!(criterion_params(FilterCriterion::All, now()).is_empty());
    }

    #[test]
    fn test_today_clause_is_midnight() {
        let params = criterion_params(FilterCriterion::Today, now());
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, "created_at");
        assert_eq!(params[0].1, "gte.2026-08-28T00:00:00+00:00");
    }

    #[test]
    fn test_past_week_clause() {
        let params = criterion_params(FilterCriterion::PastWeek, now());
        assert_eq!(params[0].0, "created_at");
        assert_eq!(params[0].1, "gte.2026-08-21T10:30:00+00:00");
    }

    #[test]
    fn test_vpn_clause() {
        let params = criterion_params(FilterCriterion::VpnOnly, now());
        assert_eq!(params, vec![("is_vpn", "eq.true".to_string())]);
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let source = RestSessionSource::new(&BackendConfig {
            url: "https://project.example.co/".to_string(),
            api_key: "anon".to_string(),
            timeout_seconds: 10,
        })
        .unwrap();
        assert_eq!(
            source.table_url(),
            "https://project.example.co/rest/v1/cli_sessions"
        );
    }

    #[test]
    fn test_session_record_decodes_backend_shape() {
        let body = serde_json::json!([{
            "id": "7b6a3a3e-4f3a-4e2e-9f4e-2f9d9a1b2c3d",
            "cli_users": {"email": "op@example.com", "username": "op"},
            "created_at": "2026-08-28T09:00:00+00:00",
            "last_activity": "2026-08-28T10:00:00+00:00",
            "country_code": "ES",
            "country": "Spain",
            "city": "Madrid",
            "distro": "Kali Linux",
            "terminal": "xterm-256color",
            "public_ip": "203.0.113.7",
            "is_vpn": true
        }]);

        let records: Vec<SessionRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_vpn);
        assert_eq!(records[0].user.as_ref().unwrap().username.as_deref(), Some("op"));
        assert_eq!(records[0].country_code.as_deref(), Some("ES"));
    }

    #[test]
    fn test_session_record_tolerates_sparse_rows() {
        let body = serde_json::json!([{
            "id": "7b6a3a3e-4f3a-4e2e-9f4e-2f9d9a1b2c3d",
            "created_at": "2026-08-28T09:00:00+00:00"
        }]);

        let records: Vec<SessionRecord> = serde_json::from_value(body).unwrap();
        assert!(records[0].user.is_none());
        assert!(records[0].last_activity.is_none());
        assert!(!records[0].is_vpn);
    }
}
