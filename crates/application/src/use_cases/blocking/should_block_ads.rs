use crate::ports::{keys, EntitlementProvider, PreferencesStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Ad blocking is active only for premium subscribers who left the global
/// switch on.
pub struct ShouldBlockAdsUseCase {
    entitlements: Arc<dyn EntitlementProvider>,
    preferences: Arc<dyn PreferencesStore>,
    default_enabled: bool,
}

impl ShouldBlockAdsUseCase {
    pub fn new(
        entitlements: Arc<dyn EntitlementProvider>,
        preferences: Arc<dyn PreferencesStore>,
        default_enabled: bool,
    ) -> Self {
        Self {
            entitlements,
            preferences,
            default_enabled,
        }
    }

    pub async fn execute(&self) -> bool {
        let tier = match self.entitlements.current_tier().await {
            Ok(tier) => tier,
            Err(e) => {
                warn!(error = %e, "Entitlement lookup failed, ad blocking disabled");
                return false;
            }
        };

        if !tier.allows_ad_blocking() {
            debug!(tier = tier.as_str(), "Subscription tier does not include ad blocking");
            return false;
        }

        match self.preferences.get_bool(keys::AD_BLOCKING_ENABLED).await {
            Ok(Some(enabled)) => enabled,
            Ok(None) => self.default_enabled,
            Err(e) => {
                warn!(error = %e, "Failed to read ad blocking switch");
                false
            }
        }
    }
}
