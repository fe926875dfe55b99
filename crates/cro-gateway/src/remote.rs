//! Remote strategy: every operation is one request/response exchange with the
//! analysis service.
//!
//! Endpoints, relative to the configured base URL:
//! - `POST /analyze` with `{"url": "..."}` → report record
//! - `GET /reports` → `{"reports": [...]}`
//! - `GET /reports/{id}` → report record

use std::time::Duration;

use async_trait::async_trait;
use cro_config::RemoteConfig;
use cro_core::validate::{check_report_id, parse_report_url};
use cro_core::{ReportError, ReportRecord};
use serde::{Deserialize, Serialize};

use crate::AnalysisGateway;
use crate::http::{body_error, check_response, transport};

const SUBMIT_FAILED: &str = "Failed to process URL";
const LIST_FAILED: &str = "Failed to fetch reports";
const FETCH_FAILED: &str = "Failed to fetch report by ID";
const CLEAR_UNSUPPORTED: &str = "Report history is kept by the analysis service";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ReportsResponse {
    #[serde(default)]
    reports: Vec<serde_json::Value>,
}

/// HTTP client for the analysis service. Performs no local persistence.
pub struct RemoteGateway {
    http: reqwest::Client,
    base_url: String,
    max_reports: usize,
}

impl std::fmt::Debug for RemoteGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGateway")
            .field("base_url", &self.base_url)
            .field("max_reports", &self.max_reports)
            .finish_non_exhaustive()
    }
}

impl RemoteGateway {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the underlying client fails to build.
    pub fn new(
        base_url: &str,
        max_reports: usize,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            max_reports: max_reports.max(1),
        })
    }

    /// Build from the `[remote]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the underlying client fails to build.
    pub fn from_config(config: &RemoteConfig, max_reports: usize) -> Result<Self, reqwest::Error> {
        Self::new(
            config.normalized_base_url(),
            max_reports,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Decode and validate a single record from a successful response.
    async fn read_record(resp: reqwest::Response) -> Result<ReportRecord, ReportError> {
        let status = resp.status().as_u16();
        let record: ReportRecord = resp.json().await.map_err(|e| body_error(&e, status))?;
        record.validate().map_err(|e| {
            ReportError::remote(Some(status), format!("service returned an invalid report: {e}"))
        })?;
        Ok(record)
    }
}

#[async_trait]
impl AnalysisGateway for RemoteGateway {
    async fn submit(&self, url: &str) -> Result<ReportRecord, ReportError> {
        let url = parse_report_url(url)?;

        let endpoint = self.endpoint("analyze");
        tracing::debug!(%endpoint, url = %url, "submitting page for analysis");
        let resp = self
            .http
            .post(&endpoint)
            .json(&AnalyzeRequest { url: url.as_str() })
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let resp = check_response(resp, SUBMIT_FAILED).await?;

        Self::read_record(resp).await
    }

    async fn fetch_recent(&self) -> Result<Vec<ReportRecord>, ReportError> {
        let endpoint = self.endpoint("reports");
        tracing::debug!(%endpoint, "fetching recent reports");
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let resp = check_response(resp, LIST_FAILED).await?;
        let status = resp.status().as_u16();
        let data: ReportsResponse = resp.json().await.map_err(|e| body_error(&e, status))?;

        let mut records: Vec<ReportRecord> = data
            .reports
            .into_iter()
            .filter_map(|entry| {
                match serde_json::from_value::<ReportRecord>(entry) {
                    Ok(record) if record.validate().is_ok() => Some(record),
                    Ok(record) => {
                        tracing::warn!(id = %record.id, "service listed an invalid report; skipping");
                        None
                    }
                    Err(error) => {
                        tracing::warn!(%error, "service listed a malformed report; skipping");
                        None
                    }
                }
            })
            .collect();

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(self.max_reports);
        Ok(records)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<ReportRecord, ReportError> {
        let id = check_report_id(id)?;

        let endpoint = self.endpoint(&format!("reports/{}", urlencoding::encode(id)));
        tracing::debug!(%endpoint, "fetching report");
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ReportError::not_found(id));
        }
        let resp = check_response(resp, FETCH_FAILED).await?;

        Self::read_record(resp).await
    }

    async fn clear_history(&self) -> Result<usize, ReportError> {
        Err(ReportError::Validation(CLEAR_UNSUPPORTED.into()))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> RemoteGateway {
        RemoteGateway::new(base, 5, Duration::from_secs(1), "cro-test").expect("client builds")
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let gw = gateway("https://api.example.com/v1/");
        assert_eq!(gw.base_url(), "https://api.example.com/v1");
        assert_eq!(gw.endpoint("analyze"), "https://api.example.com/v1/analyze");
    }

    #[test]
    fn reports_response_defaults_to_empty() {
        let data: ReportsResponse = serde_json::from_str("{}").unwrap();
        assert!(data.reports.is_empty());
    }

    #[tokio::test]
    async fn submit_validates_before_any_request() {
        // Port 9 (discard) is never contacted: validation fails first.
        let gw = gateway("http://127.0.0.1:9");
        let err = gw.submit("not-a-url").await.unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[tokio::test]
    async fn fetch_by_id_rejects_blank_id_before_any_request() {
        let gw = gateway("http://127.0.0.1:9");
        let err = gw.fetch_by_id("").await.unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[tokio::test]
    async fn clear_history_is_refused_without_a_request() {
        let gw = gateway("http://127.0.0.1:9");
        let err = gw.clear_history().await.unwrap_err();
        assert_eq!(err, ReportError::Validation(CLEAR_UNSUPPORTED.into()));
    }
}
