use super::{Repositories, Services};
use ferrous_shield_application::use_cases::{
    AddWhitelistDomainUseCase, GetWhitelistUseCase, PrepareNavigationUseCase,
    RemoveWhitelistDomainUseCase, SetBlockingEnabledUseCase, ShouldBlockAdsUseCase,
    UpdateFilterListsUseCase,
};
use ferrous_shield_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub should_block_ads: Arc<ShouldBlockAdsUseCase>,
    pub set_blocking_enabled: Arc<SetBlockingEnabledUseCase>,
    pub prepare_navigation: Arc<PrepareNavigationUseCase>,
    pub update_filter_lists: Arc<UpdateFilterListsUseCase>,
    pub add_whitelist: Arc<AddWhitelistDomainUseCase>,
    pub remove_whitelist: Arc<RemoveWhitelistDomainUseCase>,
    pub get_whitelist: Arc<GetWhitelistUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories, services: &Services) -> Self {
        let should_block_ads = Arc::new(ShouldBlockAdsUseCase::new(
            repos.entitlements.clone(),
            repos.preferences.clone(),
            config.blocking.enabled,
        ));

        Self {
            set_blocking_enabled: Arc::new(SetBlockingEnabledUseCase::new(
                repos.preferences.clone(),
            )),
            prepare_navigation: Arc::new(PrepareNavigationUseCase::new(
                should_block_ads.clone(),
                repos.whitelist.clone(),
                services.coordinator.clone(),
            )),
            update_filter_lists: Arc::new(
                UpdateFilterListsUseCase::new(
                    config.filter_lists(),
                    services.storage.clone(),
                    services.fetcher.clone(),
                    repos.preferences.clone(),
                )
                .with_interval(Duration::from_secs(config.refresh.interval_secs)),
            ),
            add_whitelist: Arc::new(AddWhitelistDomainUseCase::new(repos.whitelist.clone())),
            remove_whitelist: Arc::new(RemoveWhitelistDomainUseCase::new(
                repos.whitelist.clone(),
            )),
            get_whitelist: Arc::new(GetWhitelistUseCase::new(repos.whitelist.clone())),
            should_block_ads,
        }
    }
}
