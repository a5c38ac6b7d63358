use super::write_atomic;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_shield_application::ports::FilterListStorage;
use ferrous_shield_domain::{DomainError, FilterList, ListDownload};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// Downloaded filter lists, one `<name>.txt` file per list.
pub struct FileFilterListStorage {
    directory: PathBuf,
}

impl FileFilterListStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, list_name: &str) -> Result<PathBuf, DomainError> {
        FilterList::validate_name(list_name).map_err(DomainError::FilterListStorageError)?;
        Ok(self.directory.join(format!("{}.txt", list_name)))
    }
}

#[async_trait]
impl FilterListStorage for FileFilterListStorage {
    async fn save(&self, list_name: &str, download: &ListDownload) -> Result<PathBuf, DomainError> {
        let path = self.path_for(list_name)?;

        write_atomic(&path, download.body.as_bytes())
            .await
            .map_err(|e| DomainError::FilterListStorageError(e.to_string()))?;

        debug!(
            list = list_name,
            path = %path.display(),
            etag = download.etag.as_deref().unwrap_or("-"),
            "Filter list written"
        );

        Ok(path)
    }

    async fn read(&self, list_name: &str) -> Option<PathBuf> {
        let path = self.path_for(list_name).ok()?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }

    async fn delete(&self, list_name: &str) -> Result<(), DomainError> {
        let path = self.path_for(list_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FilterListStorageError(format!(
                "cannot delete {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn last_modified(&self, list_names: &[&str]) -> Option<DateTime<Utc>> {
        if list_names.is_empty() {
            return None;
        }

        let mut earliest: Option<DateTime<Utc>> = None;

        for name in list_names {
            let path = self.path_for(name).ok()?;
            let modified = match fs::metadata(&path).await.and_then(|m| m.modified()) {
                Ok(modified) => DateTime::<Utc>::from(modified),
                Err(e) => {
                    if e.kind() != ErrorKind::NotFound {
                        warn!(path = %path.display(), error = %e, "Cannot read list metadata");
                    }
                    return None;
                }
            };

            earliest = Some(match earliest {
                Some(current) if current <= modified => current,
                _ => modified,
            });
        }

        earliest
    }
}
