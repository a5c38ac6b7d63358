mod file_storage;

pub use file_storage::FileFilterListStorage;

use ferrous_shield_domain::DomainError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes `contents` next to `path` and renames it into place, so readers
/// never observe a partially written file.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            DomainError::IoError(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }

    let tmp = temp_path(path);

    fs::write(&tmp, contents)
        .await
        .map_err(|e| DomainError::IoError(format!("cannot write {}: {}", tmp.display(), e)))?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(DomainError::IoError(format!(
            "cannot move {} into place: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

/// `<file name>.tmp` beside `path`; the original extension is kept so
/// `x.txt` and `x.json` in one directory never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
