use async_trait::async_trait;
use ferrous_shield_domain::{DomainError, SubscriptionTier};

#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    async fn current_tier(&self) -> Result<SubscriptionTier, DomainError>;
}
