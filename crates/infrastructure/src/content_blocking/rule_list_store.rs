use super::matcher::RuleListMatcher;
use crate::storage::write_atomic;
use async_trait::async_trait;
use ferrous_shield_application::ports::RuleListStore;
use ferrous_shield_domain::{ContentBlockerDocument, DomainError, FilterList, RuleListHandle};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// Rule list engine backed by `<directory>/<identifier>.json`.
///
/// Documents are checked by building a [`RuleListMatcher`] before they are
/// persisted, so a stored list always loads.
pub struct FileRuleListStore {
    directory: PathBuf,
}

impl FileRuleListStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, identifier: &str) -> Result<PathBuf, DomainError> {
        FilterList::validate_name(identifier).map_err(DomainError::RuleListCompileError)?;
        Ok(self.directory.join(format!("{}.json", identifier)))
    }
}

/// Decodes and checks a document on the blocking pool; building every
/// url-filter regex of a full list takes far too long for a runtime worker.
async fn decode_and_validate(
    identifier: &str,
    encoded_rules: String,
) -> Result<ContentBlockerDocument, DomainError> {
    let task_identifier = identifier.to_string();
    tokio::task::spawn_blocking(move || {
        let document = ContentBlockerDocument::from_json(&encoded_rules).map_err(|e| {
            DomainError::RuleListCompileError(format!("{}: {}", task_identifier, e))
        })?;
        RuleListMatcher::new(&document.rules)?;
        Ok(document)
    })
    .await
    .map_err(|e| DomainError::RuleListCompileError(format!("{}: validation task: {}", identifier, e)))?
}

#[async_trait]
impl RuleListStore for FileRuleListStore {
    async fn compile(
        &self,
        identifier: &str,
        encoded_rules: &str,
    ) -> Result<RuleListHandle, DomainError> {
        let path = self.path_for(identifier)?;

        let document = decode_and_validate(identifier, encoded_rules.to_string()).await?;

        write_atomic(&path, encoded_rules.as_bytes())
            .await
            .map_err(|e| DomainError::RuleListCompileError(e.to_string()))?;

        info!(
            identifier,
            rules = document.len(),
            path = %path.display(),
            "Rule list compiled"
        );

        Ok(RuleListHandle::new(identifier, document.rules))
    }

    async fn lookup(&self, identifier: &str) -> Result<RuleListHandle, DomainError> {
        let path = self.path_for(identifier)?;

        let contents = fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DomainError::RuleListNotFound(identifier.to_string())
            } else {
                DomainError::IoError(format!("cannot read {}: {}", path.display(), e))
            }
        })?;

        let document = tokio::task::spawn_blocking(move || ContentBlockerDocument::from_json(&contents))
            .await
            .map_err(|e| DomainError::IoError(format!("{}: decode task: {}", identifier, e)))??;

        debug!(identifier, rules = document.len(), "Rule list loaded from store");

        Ok(RuleListHandle::new(identifier, document.rules))
    }

    async fn remove(&self, identifier: &str) -> Result<(), DomainError> {
        let path = self.path_for(identifier)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::IoError(format!(
                "cannot delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
