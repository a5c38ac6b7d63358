use crate::ports::WhitelistRepository;
use ferrous_shield_domain::{DomainError, WhitelistedDomain};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct RemoveWhitelistDomainUseCase {
    repository: Arc<dyn WhitelistRepository>,
}

impl RemoveWhitelistDomainUseCase {
    pub fn new(repository: Arc<dyn WhitelistRepository>) -> Self {
        Self { repository }
    }

    /// Removes the entry at `index` of the newest-first listing. Out of range
    /// indices are a no-op.
    #[instrument(skip(self))]
    pub async fn execute_at(&self, index: usize) -> Result<Option<WhitelistedDomain>, DomainError> {
        let removed = self.repository.remove_at(index).await?;

        match &removed {
            Some(domain) => info!(domain = %domain.domain, index, "Domain removed from whitelist"),
            None => debug!(index, "No whitelist entry at index"),
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<bool, DomainError> {
        let normalized = WhitelistedDomain::normalize(domain);
        let removed = self.repository.remove_domain(&normalized).await?;

        if removed {
            info!(domain = %normalized, "Domain removed from whitelist");
        } else {
            debug!(domain = %normalized, "Domain was not whitelisted");
        }

        Ok(removed)
    }
}
