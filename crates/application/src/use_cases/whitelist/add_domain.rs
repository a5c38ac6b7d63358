use crate::ports::WhitelistRepository;
use ferrous_shield_domain::{DomainError, WhitelistInsert, WhitelistedDomain};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct AddWhitelistDomainUseCase {
    repository: Arc<dyn WhitelistRepository>,
}

impl AddWhitelistDomainUseCase {
    pub fn new(repository: Arc<dyn WhitelistRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, input: &str) -> Result<WhitelistInsert, DomainError> {
        let domain = WhitelistedDomain::parse(input).map_err(DomainError::InvalidDomainName)?;

        let outcome = self.repository.add_domain(&domain).await?;

        match outcome {
            WhitelistInsert::Added => {
                info!(domain = %domain.domain, "Domain added to whitelist");
            }
            WhitelistInsert::AlreadyPresent => {
                info!(domain = %domain.domain, "Domain already whitelisted");
            }
        }

        Ok(outcome)
    }
}
