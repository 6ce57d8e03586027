//! npm install procedure for lspup.
//!
//! Language servers published on npm are installed as dev dependencies of
//! the install root. The package's executable shim in
//! `node_modules/.bin` is then linked into the bin directory.

pub mod commands;

use async_trait::async_trait;
use lspup_core::Result;
use lspup_core::link::force_symlink;
use lspup_core::tools::{InstallContext, InstallMode, Installer, ServerDescriptor};
use std::path::PathBuf;
use tracing::{debug, info};

/// Installer for an npm-managed language server.
pub struct NpmInstaller {
    language: String,
    package: String,
    bin: String,
    context: InstallContext,
}

impl NpmInstaller {
    /// Create an installer for `language` described by `server`.
    #[must_use]
    pub fn new(context: InstallContext, language: &str, server: &ServerDescriptor) -> Self {
        Self {
            language: language.to_string(),
            package: server.package_name.to_string(),
            bin: server.executable().to_string(),
            context,
        }
    }

    /// Package handed to npm.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Shim npm creates for this server.
    #[must_use]
    pub fn shim_path(&self) -> PathBuf {
        commands::shim_path(&self.context.root_dir, &self.bin)
    }

    /// Link exposed in the bin directory.
    #[must_use]
    pub fn link_path(&self) -> PathBuf {
        self.context.bin_path(&self.bin)
    }
}

#[async_trait]
impl Installer for NpmInstaller {
    fn language(&self) -> &str {
        &self.language
    }

    fn mode(&self) -> InstallMode {
        InstallMode::PackageManager
    }

    async fn install(&self) -> Result<()> {
        let shim = self.shim_path();
        if tokio::fs::try_exists(&shim).await.unwrap_or(false) {
            debug!(package = %self.package, shim = ?shim, "Package already installed");
        } else {
            info!(language = %self.language, package = %self.package, "Installing npm package");
            commands::install_dev(&self.context.npm_program, &self.context.root_dir, &self.package)
                .await?;
        }

        let link = self.link_path();
        force_symlink(&shim, &link).await?;
        info!(language = %self.language, link = ?link, "Linked language server");
        Ok(())
    }

    async fn update(&self) -> Result<()> {
        info!(language = %self.language, package = %self.package, "Updating npm package");
        commands::update_dev(&self.context.npm_program, &self.context.root_dir, &self.package).await
    }
}
