//! Installer construction.
//!
//! Maps a registry entry to the install procedure for its mode. Entries that
//! cannot be installed (release mode without paths or without a release
//! asset) produce no installer, so they are silently left out of a run.

use lspup_core::Result;
use lspup_core::tools::{InstallContext, InstallMode, Installer, ServerDescriptor, release_url, servers};
use lspup_tools_github::ReleaseInstaller;
use lspup_tools_go::GoInstaller;
use lspup_tools_npm::NpmInstaller;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Builds installers for one invocation.
pub struct InstallerBuilder {
    context: InstallContext,
    client: Client,
}

impl InstallerBuilder {
    /// Create a builder with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(context: InstallContext) -> Result<Self> {
        Ok(Self::with_client(context, lspup_tools_github::http_client()?))
    }

    /// Create a builder that shares `client` between release installers.
    #[must_use]
    pub fn with_client(context: InstallContext, client: Client) -> Self {
        Self { context, client }
    }

    /// Context installers are built with.
    #[must_use]
    pub fn context(&self) -> &InstallContext {
        &self.context
    }

    /// Build the installer for `language`, if it can be installed.
    #[must_use]
    pub fn build(&self, language: &str, server: &ServerDescriptor) -> Option<Arc<dyn Installer>> {
        let installer: Arc<dyn Installer> = match server.mode {
            InstallMode::PackageManager => {
                Arc::new(NpmInstaller::new(self.context.clone(), language, server))
            }
            InstallMode::ReleaseArchive => {
                let (Some(source), Some(target)) = (server.source_path, server.link_target) else {
                    debug!(%language, "Release server without source/target, skipping");
                    return None;
                };
                let Some(url) = release_url(language) else {
                    debug!(%language, "No release asset, skipping");
                    return None;
                };
                Arc::new(ReleaseInstaller::new(
                    self.client.clone(),
                    &self.context,
                    language,
                    url,
                    source,
                    target,
                ))
            }
            InstallMode::Toolchain => Arc::new(GoInstaller::new(&self.context, language, server)),
        };
        Some(installer)
    }

    /// Build an installer for every registry entry that can be installed.
    #[must_use]
    pub fn build_all(&self) -> Vec<Arc<dyn Installer>> {
        servers()
            .filter_map(|(language, server)| self.build(language, server))
            .collect()
    }
}
