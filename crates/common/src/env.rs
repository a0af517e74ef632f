//! Environment/runtime helpers
//!
//! Sanity checks to ensure the bulk dataset is reachable at startup.

use std::path::Path;

use tracing::warn;

use crate::CoreError;

/// Check that the bulk CSV source exists; warn if it is missing.
///
/// A missing dataset is not fatal: the service still serves whatever is
/// already stored, and reset will report failure until the file appears.
pub async fn ensure_dataset(csv_path: &str) -> bool {
    match tokio::fs::metadata(csv_path).await {
        Ok(meta) if meta.is_file() => true,
        Ok(_) => {
            warn!(%csv_path, "dataset path is not a regular file; imports will fail");
            false
        }
        Err(_) => {
            warn!(%csv_path, "dataset file not found; imports will fail");
            false
        }
    }
}

/// Make sure the parent directory of a SQLite database file exists.
pub async fn ensure_parent_dir(file_path: &str) -> Result<(), CoreError> {
    let Some(parent) = Path::new(file_path).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| CoreError::Env(format!("cannot create {}: {e}", parent.display())))
}
