//! Read-only client for the remote health authority.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use thiserror::Error;
use tracing::debug;

use fleetmend_core::AuthorityConfig;

use crate::records::{RawNode, ReportPage};

/// Why a report fetch produced no records.
///
/// The caller owns the degrade policy: any of these is logged and then
/// treated as an empty report, never escalated past the fetch stage.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authority returned HTTP {status}")]
    Status { status: StatusCode },

    #[error("report body did not parse: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issues the per-pass eligibility query against the authority.
pub struct AuthorityClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl AuthorityClient {
    /// Build a client from the `[authority]` configuration.
    ///
    /// The request timeout is a hard bound; there are no in-process
    /// retries, the next scheduled pass is the retry.
    pub fn new(config: &AuthorityConfig) -> Result<Self, ReportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Ok(referer) = HeaderValue::from_str(&config.base_url) {
            headers.insert(REFERER, referer);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Fetch the endpoint records currently reported for `address`.
    ///
    /// Issues exactly one GET with the address as a substring filter
    /// (`search=http://{address}/`, percent-encoded on the wire).
    pub async fn fetch_report(&self, address: &str) -> Result<Vec<RawNode>, ReportError> {
        let url = format!("{}/nodes", self.base_url);
        let search = format!("http://{address}/");
        debug!(%url, %search, "requesting endpoint report");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", "1".to_string()),
                ("size", self.page_size.to_string()),
                ("search", search),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status { status });
        }

        let body = response.text().await?;
        let page: ReportPage = serde_json::from_str(&body)?;
        Ok(page.nodes)
    }
}
