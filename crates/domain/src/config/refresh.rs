use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Minimum age of the stalest downloaded list before lists are fetched again.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// How often the background job asks whether a refresh is due.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            check_interval_secs: default_check_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_interval_secs() -> u64 {
    86400
}

fn default_check_interval_secs() -> u64 {
    3600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Ferrous-Shield/1.0 (filter-list-sync)".to_string()
}
