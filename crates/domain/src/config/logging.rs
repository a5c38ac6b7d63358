use serde::{Deserialize, Serialize};

/// `[logging]`. `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ferrous_shield_infrastructure=debug`.
    pub level: LogLevel,

    /// Emit JSON lines instead of the compact human readable format.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LogLevel(pub String);

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LogLevel {
    fn from(level: String) -> Self {
        Self(level)
    }
}
