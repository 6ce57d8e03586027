//! npm CLI command wrappers.
//!
//! Every command runs with the install root as working directory, so
//! packages land in `<root>/node_modules`.

use lspup_core::Result;
use lspup_core::process;
use std::path::Path;

/// Add `package` as a dev dependency.
///
/// # Errors
///
/// Returns an error if npm cannot be started or the install fails.
pub async fn install_dev(npm: &str, root: &Path, package: &str) -> Result<()> {
    process::run(npm, &["install", "-D", package], Some(root)).await
}

/// Update the dev dependency `package`.
///
/// # Errors
///
/// Returns an error if npm cannot be started or the update fails.
pub async fn update_dev(npm: &str, root: &Path, package: &str) -> Result<()> {
    process::run(npm, &["update", "-D", package], Some(root)).await
}

/// Path of the executable shim npm creates for `bin`.
#[must_use]
pub fn shim_path(root: &Path, bin: &str) -> std::path::PathBuf {
    root.join("node_modules").join(".bin").join(bin)
}
