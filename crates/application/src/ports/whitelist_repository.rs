use async_trait::async_trait;
use ferrous_shield_domain::{DomainError, WhitelistInsert, WhitelistedDomain};

#[async_trait]
pub trait WhitelistRepository: Send + Sync {
    /// All domains, newest first.
    async fn get_all(&self) -> Result<Vec<WhitelistedDomain>, DomainError>;
    async fn add_domain(&self, domain: &WhitelistedDomain)
        -> Result<WhitelistInsert, DomainError>;
    /// Returns whether the domain was present.
    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError>;
    async fn remove_at(&self, index: usize) -> Result<Option<WhitelistedDomain>, DomainError>;
    async fn is_whitelisted(&self, domain: &str) -> Result<bool, DomainError>;
}
