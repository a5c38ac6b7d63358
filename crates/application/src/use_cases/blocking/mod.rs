mod prepare_navigation;
mod set_blocking_enabled;
mod should_block_ads;

pub use prepare_navigation::PrepareNavigationUseCase;
pub use set_blocking_enabled::SetBlockingEnabledUseCase;
pub use should_block_ads::ShouldBlockAdsUseCase;
