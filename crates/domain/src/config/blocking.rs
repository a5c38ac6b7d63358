use crate::filter_list::{FilterList, ListFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Initial value of the global enablement flag before the user toggles it.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Delay before re-issuing a navigation after rule lists were attached or
    /// detached, used when the surface cannot signal that they were applied.
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,

    #[serde(default = "default_lists")]
    pub lists: Vec<FilterListConfig>,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reload_delay_ms: default_reload_delay_ms(),
            lists: default_lists(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterListConfig {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub format: ListFormat,

    /// Bundled default copy, relative to `storage.bundled_directory`.
    /// Defaults to `<name>.txt` (or `<name>.json` for pre-built lists).
    #[serde(default)]
    pub bundled: Option<String>,
}

impl FilterListConfig {
    pub fn to_filter_list(&self, bundled_directory: &Path) -> FilterList {
        let bundled = match &self.bundled {
            Some(file) if Path::new(file).is_absolute() => PathBuf::from(file),
            Some(file) => bundled_directory.join(file),
            None => {
                let ext = match self.format {
                    ListFormat::EasyList => "txt",
                    ListFormat::ContentBlockerJson => "json",
                };
                bundled_directory.join(format!("{}.{}", self.name, ext))
            }
        };

        FilterList::new(
            self.name.as_str(),
            self.url.as_deref().map(Arc::from),
            self.format,
        )
        .with_bundled_path(bundled)
    }
}

fn default_true() -> bool {
    true
}

fn default_reload_delay_ms() -> u64 {
    500
}

fn default_lists() -> Vec<FilterListConfig> {
    vec![
        FilterListConfig {
            name: "easy-list".to_string(),
            url: Some("https://easylist.to/easylist/easylist.txt".to_string()),
            format: ListFormat::EasyList,
            bundled: None,
        },
        FilterListConfig {
            name: "easy-privacy".to_string(),
            url: Some("https://easylist.to/easylist/easyprivacy.txt".to_string()),
            format: ListFormat::EasyList,
            bundled: None,
        },
    ]
}
