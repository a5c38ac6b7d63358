mod browsing_surface;
mod content_blocking;
mod entitlement_provider;
mod filter_list_fetcher;
mod filter_list_storage;
mod preferences_store;
mod rule_list_store;
mod whitelist_repository;

pub use browsing_surface::BrowsingSurface;
pub use content_blocking::{ContentBlockingPort, SetupReport};
pub use entitlement_provider::EntitlementProvider;
pub use filter_list_fetcher::FilterListFetcher;
pub use filter_list_storage::FilterListStorage;
pub use preferences_store::{keys, PreferencesStore};
pub use rule_list_store::RuleListStore;
pub use whitelist_repository::WhitelistRepository;
