use async_trait::async_trait;
use ferrous_shield_domain::{DomainError, ListDownload};

#[async_trait]
pub trait FilterListFetcher: Send + Sync {
    /// Downloads a list; non-2xx statuses and empty bodies are errors.
    async fn fetch(&self, url: &str) -> Result<ListDownload, DomainError>;
}
