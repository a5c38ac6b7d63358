use async_trait::async_trait;
use ferrous_shield_application::ports::{keys, EntitlementProvider, PreferencesStore};
use ferrous_shield_domain::{DomainError, SubscriptionTier};
use std::sync::Arc;

/// Reads the subscription tier cached in preferences by the sign-in flow.
/// A missing value means the free tier.
pub struct PreferencesEntitlementProvider {
    preferences: Arc<dyn PreferencesStore>,
}

impl PreferencesEntitlementProvider {
    pub fn new(preferences: Arc<dyn PreferencesStore>) -> Self {
        Self { preferences }
    }

    pub async fn set_tier(&self, tier: SubscriptionTier) -> Result<(), DomainError> {
        self.preferences
            .set_string(keys::SUBSCRIPTION_TIER, tier.as_str())
            .await
    }
}

#[async_trait]
impl EntitlementProvider for PreferencesEntitlementProvider {
    async fn current_tier(&self) -> Result<SubscriptionTier, DomainError> {
        match self.preferences.get_string(keys::SUBSCRIPTION_TIER).await? {
            Some(raw) => raw.parse().map_err(DomainError::EntitlementError),
            None => Ok(SubscriptionTier::Free),
        }
    }
}
