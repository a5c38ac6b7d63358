use async_trait::async_trait;
use bytes::Bytes;
use ferrous_shield_application::ports::FilterListFetcher;
use ferrous_shield_domain::{DomainError, ListDownload};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct ReqwestFilterListFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFilterListFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::FilterListFetchError(format!("http client: {}", e)))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl FilterListFetcher for ReqwestFilterListFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<ListDownload, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::FilterListFetchError(format!("fetch error for {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::FilterListFetchError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::FilterListFetchError(format!("read error for {}: {}", url, e)))?;

        if bytes.is_empty() {
            return Err(DomainError::FilterListFetchError(format!(
                "empty body for {}",
                url
            )));
        }

        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(url, status = status.as_u16(), bytes = bytes.len(), "Filter list downloaded");

        Ok(ListDownload {
            url: Arc::from(url),
            status: status.as_u16(),
            etag,
            body,
        })
    }
}
