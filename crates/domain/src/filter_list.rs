use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListFormat {
    /// Plain-text EasyList syntax, parsed and translated before compilation.
    #[default]
    EasyList,
    /// Already in the content-blocker JSON format; compiled as-is.
    ContentBlockerJson,
}

/// A statically configured filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterList {
    pub name: Arc<str>,
    pub url: Option<Arc<str>>,
    pub format: ListFormat,
    pub bundled_path: Option<PathBuf>,
}

impl FilterList {
    pub fn new(name: impl Into<Arc<str>>, url: Option<Arc<str>>, format: ListFormat) -> Self {
        Self {
            name: name.into(),
            url,
            format,
            bundled_path: None,
        }
    }

    pub fn with_bundled_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundled_path = Some(path.into());
        self
    }

    /// Lists that are downloaded and refreshed on a schedule.
    pub fn is_refreshable(&self) -> bool {
        self.url.is_some() && self.format == ListFormat::EasyList
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Filter list name cannot be empty".to_string());
        }

        if name.len() > 100 {
            return Err("Filter list name cannot exceed 100 characters".to_string());
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!(
                "Filter list name '{}' may only contain ASCII letters, digits, '-' and '_'",
                name
            ));
        }

        Ok(())
    }

    pub fn validate_url(url: &Option<Arc<str>>) -> Result<(), String> {
        if let Some(u) = url {
            if u.len() > 2048 {
                return Err("URL cannot exceed 2048 characters".to_string());
            }
            if !u.starts_with("http://") && !u.starts_with("https://") {
                return Err("URL must start with http:// or https://".to_string());
            }
        }
        Ok(())
    }
}

/// A downloaded filter list body together with the response metadata it
/// arrived with.
#[derive(Debug, Clone)]
pub struct ListDownload {
    pub url: Arc<str>,
    pub status: u16,
    pub etag: Option<String>,
    pub body: String,
}
