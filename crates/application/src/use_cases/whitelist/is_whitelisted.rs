use crate::ports::WhitelistRepository;
use ferrous_shield_domain::{DomainError, WhitelistedDomain};
use std::sync::Arc;

pub struct IsWhitelistedUseCase {
    repository: Arc<dyn WhitelistRepository>,
}

impl IsWhitelistedUseCase {
    pub fn new(repository: Arc<dyn WhitelistRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, domain: &str) -> Result<bool, DomainError> {
        self.repository
            .is_whitelisted(&WhitelistedDomain::normalize(domain))
            .await
    }
}
