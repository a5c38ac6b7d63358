use super::ShouldBlockAdsUseCase;
use crate::ports::{BrowsingSurface, ContentBlockingPort, WhitelistRepository};
use ferrous_shield_domain::{DomainError, NavigationRequest};
use std::sync::Arc;
use tracing::debug;

/// Page-will-load hook: decides whether rule lists apply to the page about to
/// be shown and attaches or detaches them before re-issuing the request.
pub struct PrepareNavigationUseCase {
    should_block_ads: Arc<ShouldBlockAdsUseCase>,
    whitelist: Arc<dyn WhitelistRepository>,
    blocking: Arc<dyn ContentBlockingPort>,
}

impl PrepareNavigationUseCase {
    pub fn new(
        should_block_ads: Arc<ShouldBlockAdsUseCase>,
        whitelist: Arc<dyn WhitelistRepository>,
        blocking: Arc<dyn ContentBlockingPort>,
    ) -> Self {
        Self {
            should_block_ads,
            whitelist,
            blocking,
        }
    }

    /// Returns whether blocking is active for the request.
    pub async fn execute(
        &self,
        surface: &dyn BrowsingSurface,
        request: NavigationRequest,
    ) -> Result<bool, DomainError> {
        let mut enabled = self.should_block_ads.execute().await;

        if enabled {
            if let Some(domain) = request.domain() {
                if self.whitelist.is_whitelisted(&domain).await? {
                    debug!(domain = %domain, "Domain is whitelisted");
                    enabled = false;
                }
            }
        }

        self.blocking
            .should_add_block_rule_list(enabled, surface, Some(request))
            .await;

        Ok(enabled)
    }
}
