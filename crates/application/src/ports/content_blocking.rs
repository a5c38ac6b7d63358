use super::BrowsingSurface;
use async_trait::async_trait;
use ferrous_shield_domain::{NavigationRequest, RuleListHandle};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Lists attached to the surface during this call, in completion order.
    pub attached: Vec<String>,
    pub failed: Vec<String>,
    /// Rule lists were already compiled earlier in this process.
    pub already_initialized: bool,
}

#[async_trait]
pub trait ContentBlockingPort: Send + Sync {
    async fn setup_internal_rule_lists(&self, surface: &dyn BrowsingSurface) -> SetupReport;

    async fn should_add_block_rule_list(
        &self,
        enabled: bool,
        surface: &dyn BrowsingSurface,
        pending: Option<NavigationRequest>,
    );

    fn rule_lists(&self) -> Vec<RuleListHandle>;
}
