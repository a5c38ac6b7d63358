pub mod blocking;
pub mod filter_lists;
pub mod whitelist;

pub use blocking::{PrepareNavigationUseCase, SetBlockingEnabledUseCase, ShouldBlockAdsUseCase};
pub use filter_lists::{RefreshReport, UpdateFilterListsUseCase};
pub use whitelist::{
    AddWhitelistDomainUseCase, GetWhitelistUseCase, IsWhitelistedUseCase,
    RemoveWhitelistDomainUseCase, ToggleWhitelistUseCase,
};
