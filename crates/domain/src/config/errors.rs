use thiserror::Error;

/// Failures while loading or validating `ferrous-shield.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {0}: {1}")]
    FileRead(String, String),

    #[error("invalid TOML: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
