//! HTTP client for the Hansard report service.

use std::time::Duration;

use hansard_core::SourceFormat;
use hansard_parse::RawPayload;
use thiserror::Error;
use tracing::{debug, info};

use crate::dates::{DateError, format_sitting_date, parse_sitting_date, sitting_dates};

pub const DEFAULT_BASE_URL: &str = "https://sprs.parl.gov.sg";
const REPORT_PATH: &str = "/search/getHansardReport/";

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

/// One sitting's raw payload and the date it was fetched for.
#[derive(Debug, Clone)]
pub struct FetchedSitting {
    pub date: String,
    pub payload: RawPayload,
}

pub struct HansardClient {
    client: reqwest::Client,
    base_url: String,
    request_delay: Duration,
}

impl HansardClient {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `https://sprs.parl.gov.sg` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            request_delay: Duration::ZERO,
        }
    }

    /// Pause between consecutive requests of a range fetch.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    fn report_url(&self, date: &str) -> String {
        format!("{}{REPORT_PATH}?sittingDate={date}", self.base_url)
    }

    /// Fetch the report for one `DD-MM-YYYY` date.
    ///
    /// Returns `None` when the house did not sit that day: the service then
    /// answers with neither a section list nor a full-content document.
    pub async fn fetch_by_date(&self, date: &str) -> Result<Option<RawPayload>, SyncError> {
        let date = format_sitting_date(parse_sitting_date(date)?);
        let url = self.report_url(&date);

        info!(url = %url, "fetching hansard report");
        let resp = self.client.post(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let payload = sitting_payload(&body)?;
        match &payload {
            Some(p) => info!(date = %date, format = p.format().as_str(), "fetched sitting"),
            None => info!(date = %date, "no sitting"),
        }
        Ok(payload)
    }

    /// Fetch every sitting from `start` to `end` inclusive, one day at a
    /// time. Days without a sitting are skipped.
    pub async fn fetch_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<FetchedSitting>, SyncError> {
        let days = sitting_dates(start, end)?;
        let mut sittings = Vec::new();

        for (i, day) in days.iter().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            let date = format_sitting_date(*day);
            if let Some(payload) = self.fetch_by_date(&date).await? {
                sittings.push(FetchedSitting { date, payload });
            }
        }

        info!(days = days.len(), sittings = sittings.len(), "range fetch complete");
        Ok(sittings)
    }
}

/// Decode a report body; an empty body or an empty report is no sitting.
fn sitting_payload(body: &str) -> Result<Option<RawPayload>, SyncError> {
    if body.trim().is_empty() {
        debug!("empty report body");
        return Ok(None);
    }
    let payload = RawPayload::from_json(body)?;
    if payload.format() == SourceFormat::Unknown {
        return Ok(None);
    }
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = HansardClient::new("https://sprs.parl.gov.sg/".into());
        assert_eq!(client.base_url, "https://sprs.parl.gov.sg");
    }

    #[test]
    fn report_url_carries_sitting_date() {
        let client = HansardClient::new(DEFAULT_BASE_URL.into());
        assert_eq!(
            client.report_url("14-01-2026"),
            "https://sprs.parl.gov.sg/search/getHansardReport/?sittingDate=14-01-2026"
        );
    }

    #[test]
    fn empty_report_is_no_sitting() {
        assert!(sitting_payload("").unwrap().is_none());
        assert!(sitting_payload("{}").unwrap().is_none());
        assert!(
            sitting_payload(r#"{"takesSectionVOList": [], "htmlFullContent": null}"#)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn report_with_content_is_a_sitting() {
        let body = r#"{
            "metadata": {"sittingDate": "2026-01-14", "sittingNO": 12},
            "attendanceList": [{"mpName": "Mr Pritam Singh (Aljunied GRC)", "attendance": true}],
            "takesSectionVOList": [{"sectionType": "OA", "title": "Bus Fares", "content": "<p>x</p>"}]
        }"#;
        let payload = sitting_payload(body).unwrap().unwrap();
        assert_eq!(payload.format(), SourceFormat::New);
        assert_eq!(payload.sections().len(), 1);

        let legacy = sitting_payload(r#"{"htmlFullContent": "<p>Mr Speaker: Order.</p>"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(legacy.format(), SourceFormat::Old);
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        assert!(matches!(sitting_payload("<html>"), Err(SyncError::Json(_))));
    }

    #[tokio::test]
    async fn invalid_date_fails_before_any_request() {
        let client = HansardClient::new("http://127.0.0.1:9".into());
        let err = client.fetch_by_date("2026-01-14").await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidDate(_)));
    }
}
