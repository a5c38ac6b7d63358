use async_trait::async_trait;
use ferrous_shield_application::ports::BrowsingSurface;
use ferrous_shield_domain::{NavigationRequest, RuleListHandle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

#[derive(Default)]
struct SurfaceState {
    attached: Vec<RuleListHandle>,
    current: Option<NavigationRequest>,
}

/// A surface with no renderer behind it. Attached lists take effect
/// immediately, so callers never wait on a reload delay.
#[derive(Default)]
pub struct HeadlessSurface {
    state: Mutex<SurfaceState>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn attached(&self) -> Vec<RuleListHandle> {
        self.state().attached.clone()
    }
}

#[async_trait]
impl BrowsingSurface for HeadlessSurface {
    fn surface_id(&self) -> String {
        "headless".to_string()
    }

    fn add_rule_list(&self, handle: &RuleListHandle) {
        debug!(list = handle.identifier(), rules = handle.rule_count(), "Rule list attached");
        let mut state = self.state();
        if !state.attached.iter().any(|h| h.identifier() == handle.identifier()) {
            state.attached.push(handle.clone());
        }
    }

    fn remove_all_rule_lists(&self) {
        self.state().attached.clear();
    }

    fn current_request(&self) -> Option<NavigationRequest> {
        self.state().current.clone()
    }

    fn load(&self, request: NavigationRequest) {
        info!(url = %request.url, "Loading page");
        self.state().current = Some(request);
    }

    fn reload(&self) {
        if let Some(request) = self.current_request() {
            info!(url = %request.url, "Reloading page");
        }
    }

    async fn rule_lists_applied(&self) -> bool {
        true
    }
}
