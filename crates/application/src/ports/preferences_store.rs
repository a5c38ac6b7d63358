use async_trait::async_trait;
use ferrous_shield_domain::DomainError;

pub mod keys {
    pub const AD_BLOCKING_ENABLED: &str = "ad_blocking.enabled";
    pub const WHITELIST_DOMAINS: &str = "whitelist.domains";
    pub const SUBSCRIPTION_TIER: &str = "subscription.tier";

    /// "Already compiled" flag of one filter list.
    pub fn compiled_flag(list_name: &str) -> String {
        format!("compiled.{}", list_name)
    }
}

#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError>;
    async fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError>;
    async fn get_string(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn set_string(&self, key: &str, value: &str) -> Result<(), DomainError>;
    async fn get_strings(&self, key: &str) -> Result<Vec<String>, DomainError>;
    async fn set_strings(&self, key: &str, values: &[String]) -> Result<(), DomainError>;
}
