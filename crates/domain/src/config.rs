pub mod blocking;
pub mod database;
pub mod errors;
pub mod logging;
pub mod refresh;
pub mod root;
pub mod storage;

pub use blocking::{BlockingConfig, FilterListConfig};
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::{LogLevel, LoggingConfig};
pub use refresh::RefreshConfig;
pub use root::{CliOverrides, Config};
pub use storage::StorageConfig;
