pub mod filter_list_refresh;
pub mod runner;

pub use filter_list_refresh::FilterListRefreshJob;
pub use runner::JobRunner;
