//! Force-symlink primitive.
//!
//! Behaves like `ln -fsn src target`: any existing file or link at `target`
//! is replaced. The new link is created under a sibling name and renamed
//! over the target, so readers never observe a missing link.

use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

/// Point `target` at `source`, replacing whatever is there.
///
/// The parent directory of `target` is created if needed. `source` does not
/// have to exist.
///
/// # Errors
///
/// Returns an error if the parent directory, the link, or the rename fails.
pub async fn force_symlink(source: &Path, target: &Path) -> Result<()> {
    debug!(source = ?source, target = ?target, "Linking");

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(e, parent, "create directory"))?;
    }

    let file_name = target
        .file_name()
        .ok_or_else(|| Error::configuration(format!("Invalid link target: {}", target.display())))?;
    let staging = target.with_file_name(format!(
        ".{}.lspup-{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    // Stale staging link from an interrupted run.
    if tokio::fs::symlink_metadata(&staging).await.is_ok() {
        tokio::fs::remove_file(&staging)
            .await
            .map_err(|e| Error::io(e, &staging, "remove"))?;
    }

    tokio::fs::symlink(source, &staging)
        .await
        .map_err(|e| Error::io(e, &staging, "symlink"))?;

    if let Err(e) = tokio::fs::rename(&staging, target).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(Error::io(e, target, "rename"));
    }

    Ok(())
}
