use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_shield_domain::{DomainError, ListDownload};
use std::path::PathBuf;

#[async_trait]
pub trait FilterListStorage: Send + Sync {
    async fn save(&self, list_name: &str, download: &ListDownload)
        -> Result<PathBuf, DomainError>;

    /// Path of the saved list, only if the file exists.
    async fn read(&self, list_name: &str) -> Option<PathBuf>;

    async fn delete(&self, list_name: &str) -> Result<(), DomainError>;

    /// Earliest modification time across `list_names`; `None` if the slice
    /// is empty or any file cannot be inspected.
    async fn last_modified(&self, list_names: &[&str]) -> Option<DateTime<Utc>>;
}
