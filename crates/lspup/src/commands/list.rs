//! `lspup list`: print the server registry.

use lspup_core::tools::{InstallMode, release_url, servers};
use std::fmt::Write;

/// Render one line per registered server: key, mode, package and source.
#[must_use]
pub fn render() -> String {
    let width = servers().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, server) in servers() {
        let source = match server.mode {
            InstallMode::ReleaseArchive => release_url(key).unwrap_or_else(|| "(no asset)".to_string()),
            InstallMode::PackageManager | InstallMode::Toolchain => server.executable().to_string(),
        };
        let _ = writeln!(
            out,
            "{key:<width$}  {:<9}  {:<30}  {source}",
            server.mode.as_str(),
            server.package_name,
        );
    }
    out
}
