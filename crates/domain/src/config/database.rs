use serde::{Deserialize, Serialize};

/// `[database]`: the SQLite file holding preferences (compiled flags,
/// blocking switch, whitelist, cached subscription tier).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Connection URL understood by `sqlx`. A path that already carries the
    /// `sqlite:` scheme (e.g. `sqlite::memory:`) is used as is.
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "ferrous-shield.db".to_string(),
            max_connections: 4,
        }
    }
}
