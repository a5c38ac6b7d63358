use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Downloaded filter lists (`<name>.txt`).
    #[serde(default = "default_list_directory")]
    pub list_directory: PathBuf,

    /// Default copies shipped with the application.
    #[serde(default = "default_bundled_directory")]
    pub bundled_directory: PathBuf,

    /// Compiled rule lists (`<name>.json`).
    #[serde(default = "default_compiled_directory")]
    pub compiled_directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            list_directory: default_list_directory(),
            bundled_directory: default_bundled_directory(),
            compiled_directory: default_compiled_directory(),
        }
    }
}

fn default_list_directory() -> PathBuf {
    PathBuf::from("data/lists")
}

fn default_bundled_directory() -> PathBuf {
    PathBuf::from("data/bundled")
}

fn default_compiled_directory() -> PathBuf {
    PathBuf::from("data/compiled")
}
