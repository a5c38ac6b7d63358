use crate::ports::{keys, PreferencesStore};
use ferrous_shield_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct SetBlockingEnabledUseCase {
    preferences: Arc<dyn PreferencesStore>,
}

impl SetBlockingEnabledUseCase {
    pub fn new(preferences: Arc<dyn PreferencesStore>) -> Self {
        Self { preferences }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, enabled: bool) -> Result<(), DomainError> {
        self.preferences
            .set_bool(keys::AD_BLOCKING_ENABLED, enabled)
            .await?;
        info!(enabled, "Ad blocking switch updated");
        Ok(())
    }
}
