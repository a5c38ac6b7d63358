pub mod entitlement_provider;
pub mod preferences_store;
pub mod whitelist_repository;

pub use entitlement_provider::PreferencesEntitlementProvider;
pub use preferences_store::SqlitePreferencesStore;
pub use whitelist_repository::PreferencesWhitelistRepository;
