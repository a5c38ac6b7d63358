use crate::ports::WhitelistRepository;
use ferrous_shield_domain::{DomainError, WhitelistedDomain};
use std::sync::Arc;
use tracing::debug;

/// Lists whitelisted domains in display order (most recently added first).
/// Indices returned here are the ones `RemoveWhitelistDomainUseCase::execute_at`
/// expects.
pub struct GetWhitelistUseCase {
    whitelist: Arc<dyn WhitelistRepository>,
}

impl GetWhitelistUseCase {
    pub fn new(whitelist: Arc<dyn WhitelistRepository>) -> Self {
        Self { whitelist }
    }

    pub async fn execute(&self) -> Result<Vec<WhitelistedDomain>, DomainError> {
        let entries = self.whitelist.get_all().await?;
        debug!(count = entries.len(), "Whitelist loaded");
        Ok(entries)
    }

    /// Bare host names, same order as `execute`.
    pub async fn domains(&self) -> Result<Vec<String>, DomainError> {
        Ok(self
            .execute()
            .await?
            .into_iter()
            .map(|entry| entry.domain)
            .collect())
    }
}
