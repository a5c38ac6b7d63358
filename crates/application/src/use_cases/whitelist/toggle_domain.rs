use crate::ports::{BrowsingSurface, ContentBlockingPort, WhitelistRepository};
use crate::use_cases::blocking::ShouldBlockAdsUseCase;
use ferrous_shield_domain::{DomainError, WhitelistedDomain};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Whitelists (or un-whitelists) a domain. When the surface is showing that
/// domain, blocking is re-applied there and the current page reloaded.
pub struct ToggleWhitelistUseCase {
    repository: Arc<dyn WhitelistRepository>,
    blocking: Arc<dyn ContentBlockingPort>,
    should_block_ads: Arc<ShouldBlockAdsUseCase>,
}

impl ToggleWhitelistUseCase {
    pub fn new(
        repository: Arc<dyn WhitelistRepository>,
        blocking: Arc<dyn ContentBlockingPort>,
        should_block_ads: Arc<ShouldBlockAdsUseCase>,
    ) -> Self {
        Self {
            repository,
            blocking,
            should_block_ads,
        }
    }

    #[instrument(skip(self, surface), fields(surface = %surface.surface_id()))]
    pub async fn execute(
        &self,
        surface: &dyn BrowsingSurface,
        domain: &str,
        whitelisted: bool,
    ) -> Result<(), DomainError> {
        let domain = WhitelistedDomain::parse(domain).map_err(DomainError::InvalidDomainName)?;

        let blocking_enabled = if whitelisted {
            self.repository.add_domain(&domain).await?;
            false
        } else {
            self.repository.remove_domain(&domain.domain).await?;
            self.should_block_ads.execute().await
        };

        let current = surface.current_request();
        let showing_domain = current
            .as_ref()
            .and_then(|request| request.domain())
            .is_some_and(|shown| shown == domain.domain);

        if !showing_domain {
            debug!(
                domain = %domain.domain,
                whitelisted,
                "Whitelist toggled, surface shows another page"
            );
            return Ok(());
        }

        info!(
            domain = %domain.domain,
            whitelisted,
            blocking_enabled,
            "Whitelist toggled, re-applying rule lists"
        );

        self.blocking
            .should_add_block_rule_list(blocking_enabled, surface, current)
            .await;

        Ok(())
    }
}
