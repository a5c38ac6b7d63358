use crate::errors::DomainError;
use url::Url;

/// A page load issued (or about to be issued) on a browsing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: Url,
}

impl NavigationRequest {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Url::parse(raw)
            .map(Self::new)
            .map_err(|e| DomainError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Lower-cased host of the request, without a trailing dot.
    pub fn domain(&self) -> Option<String> {
        self.url
            .host_str()
            .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
            .filter(|h| !h.is_empty())
    }
}
