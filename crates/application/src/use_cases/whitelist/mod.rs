mod add_domain;
mod get_all;
mod is_whitelisted;
mod remove_domain;
mod toggle_domain;

pub use add_domain::AddWhitelistDomainUseCase;
pub use get_all::GetWhitelistUseCase;
pub use is_whitelisted::IsWhitelistedUseCase;
pub use remove_domain::RemoveWhitelistDomainUseCase;
pub use toggle_domain::ToggleWhitelistUseCase;
