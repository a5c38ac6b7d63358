use super::Repositories;
use ferrous_shield_domain::{Config, DomainError};
use ferrous_shield_infrastructure::content_blocking::{
    ContentBlockingCoordinator, FileRuleListStore,
};
use ferrous_shield_infrastructure::http::ReqwestFilterListFetcher;
use ferrous_shield_infrastructure::storage::FileFilterListStorage;
use std::sync::Arc;
use std::time::Duration;

pub struct Services {
    pub storage: Arc<FileFilterListStorage>,
    pub fetcher: Arc<ReqwestFilterListFetcher>,
    pub coordinator: Arc<ContentBlockingCoordinator>,
}

impl Services {
    pub fn new(config: &Config, repos: &Repositories) -> Result<Self, DomainError> {
        let storage = Arc::new(FileFilterListStorage::new(
            config.storage.list_directory.clone(),
        ));
        let rule_store = Arc::new(FileRuleListStore::new(
            config.storage.compiled_directory.clone(),
        ));
        let fetcher = Arc::new(ReqwestFilterListFetcher::new(
            &config.refresh.user_agent,
            Duration::from_secs(config.refresh.request_timeout_secs),
        )?);

        let coordinator = ContentBlockingCoordinator::new(
            config.filter_lists(),
            storage.clone(),
            rule_store,
            repos.preferences.clone(),
        )
        .with_reload_delay(Duration::from_millis(config.blocking.reload_delay_ms));

        Ok(Self {
            storage,
            fetcher,
            coordinator: Arc::new(coordinator),
        })
    }
}
