mod update_filter_lists;

pub use update_filter_lists::{RefreshReport, UpdateFilterListsUseCase};
