use async_trait::async_trait;
use ferrous_shield_domain::{NavigationRequest, RuleListHandle};

/// A live web view that compiled rule lists can be attached to.
///
/// Implementations are not expected to tolerate concurrent mutation; callers
/// serialise attach/detach/load/reload calls.
#[async_trait]
pub trait BrowsingSurface: Send + Sync {
    fn surface_id(&self) -> String;

    fn add_rule_list(&self, handle: &RuleListHandle);

    fn remove_all_rule_lists(&self);

    /// The request currently shown, `None` when no page has been loaded yet.
    fn current_request(&self) -> Option<NavigationRequest>;

    fn load(&self, request: NavigationRequest);

    fn reload(&self);

    /// Waits until previously attached/detached rule lists are in effect.
    ///
    /// Returns `false` when the surface has no way to signal this, in which
    /// case callers fall back to a fixed delay.
    async fn rule_lists_applied(&self) -> bool {
        false
    }
}
