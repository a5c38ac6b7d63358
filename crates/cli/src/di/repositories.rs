use ferrous_shield_application::ports::PreferencesStore;
use ferrous_shield_domain::DomainError;
use ferrous_shield_infrastructure::repositories::{
    PreferencesEntitlementProvider, PreferencesWhitelistRepository, SqlitePreferencesStore,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub preferences: Arc<SqlitePreferencesStore>,
    pub whitelist: Arc<PreferencesWhitelistRepository>,
    pub entitlements: Arc<PreferencesEntitlementProvider>,
}

impl Repositories {
    pub async fn new(pool: SqlitePool) -> Result<Self, DomainError> {
        let preferences = Arc::new(SqlitePreferencesStore::new(pool));
        let store: Arc<dyn PreferencesStore> = preferences.clone();
        let whitelist = PreferencesWhitelistRepository::load(store.clone()).await?;

        Ok(Self {
            preferences,
            whitelist: Arc::new(whitelist),
            entitlements: Arc::new(PreferencesEntitlementProvider::new(store)),
        })
    }
}
