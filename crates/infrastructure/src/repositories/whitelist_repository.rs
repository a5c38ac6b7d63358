use async_trait::async_trait;
use dashmap::DashSet;
use ferrous_shield_application::ports::{keys, PreferencesStore, WhitelistRepository};
use ferrous_shield_domain::{DomainError, WhitelistInsert, WhitelistedDomain};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Whitelist persisted as an ordered, newest-first string list in the
/// preferences store, mirrored in memory for lookups.
pub struct PreferencesWhitelistRepository {
    preferences: Arc<dyn PreferencesStore>,
    whitelisted_domains: Arc<DashSet<String, FxBuildHasher>>,
    write_lock: Mutex<()>,
}

impl PreferencesWhitelistRepository {
    pub async fn load(preferences: Arc<dyn PreferencesStore>) -> Result<Self, DomainError> {
        let whitelisted_domains = DashSet::with_hasher(FxBuildHasher);
        let stored = preferences.get_strings(keys::WHITELIST_DOMAINS).await?;
        for domain in &stored {
            whitelisted_domains.insert(domain.clone());
        }
        info!(domains_loaded = stored.len(), "Whitelist loaded into memory");

        Ok(Self {
            preferences,
            whitelisted_domains: Arc::new(whitelisted_domains),
            write_lock: Mutex::new(()),
        })
    }

    async fn stored(&self) -> Result<Vec<String>, DomainError> {
        self.preferences.get_strings(keys::WHITELIST_DOMAINS).await
    }

    async fn persist(&self, domains: &[String]) -> Result<(), DomainError> {
        self.preferences
            .set_strings(keys::WHITELIST_DOMAINS, domains)
            .await
    }
}

#[async_trait]
impl WhitelistRepository for PreferencesWhitelistRepository {
    async fn get_all(&self) -> Result<Vec<WhitelistedDomain>, DomainError> {
        Ok(self
            .stored()
            .await?
            .into_iter()
            .map(WhitelistedDomain::new)
            .collect())
    }

    async fn add_domain(&self, domain: &WhitelistedDomain) -> Result<WhitelistInsert, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut domains = self.stored().await?;
        if domains.iter().any(|d| d == &domain.domain) {
            self.whitelisted_domains.insert(domain.domain.clone());
            return Ok(WhitelistInsert::AlreadyPresent);
        }

        domains.insert(0, domain.domain.clone());
        self.persist(&domains).await?;
        self.whitelisted_domains.insert(domain.domain.clone());

        debug!(domain = %domain.domain, "Domain added to whitelist");
        Ok(WhitelistInsert::Added)
    }

    async fn remove_domain(&self, domain: &str) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut domains = self.stored().await?;
        let before = domains.len();
        domains.retain(|d| d != domain);

        if domains.len() == before {
            return Ok(false);
        }

        self.persist(&domains).await?;
        self.whitelisted_domains.remove(domain);

        debug!(domain = %domain, "Domain removed from whitelist");
        Ok(true)
    }

    async fn remove_at(&self, index: usize) -> Result<Option<WhitelistedDomain>, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut domains = self.stored().await?;
        if index >= domains.len() {
            return Ok(None);
        }

        let removed = domains.remove(index);
        self.persist(&domains).await?;
        self.whitelisted_domains.remove(&removed);

        debug!(domain = %removed, index, "Domain removed from whitelist");
        Ok(Some(WhitelistedDomain::new(removed)))
    }

    async fn is_whitelisted(&self, domain: &str) -> Result<bool, DomainError> {
        Ok(self.whitelisted_domains.contains(domain))
    }
}
