use async_trait::async_trait;
use ferrous_shield_domain::{DomainError, RuleListHandle};

/// Host engine that turns a content-blocker JSON document into a compiled,
/// identifier-keyed rule list.
#[async_trait]
pub trait RuleListStore: Send + Sync {
    async fn compile(
        &self,
        identifier: &str,
        encoded_rules: &str,
    ) -> Result<RuleListHandle, DomainError>;

    async fn lookup(&self, identifier: &str) -> Result<RuleListHandle, DomainError>;

    async fn remove(&self, identifier: &str) -> Result<(), DomainError>;
}
