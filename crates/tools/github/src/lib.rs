//! GitHub release-archive install procedure for lspup.
//!
//! Fetches a versioned `.tar.gz` from a GitHub release, unpacks it into a
//! per-language directory under the install root and links the configured
//! binary into the bin directory.
//!
//! The download goes to a scoped temp file inside the install root. The
//! file is removed on every exit path, including failed downloads and
//! failed extraction.

mod download;
mod extract;

pub use download::{download_to, http_client};
pub use extract::unpack_tar_gz;

use async_trait::async_trait;
use lspup_core::link::force_symlink;
use lspup_core::tools::{InstallContext, InstallMode, Installer};
use lspup_core::{Error, Result};
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info};

/// Installer for a server shipped as a release tarball.
pub struct ReleaseInstaller {
    language: String,
    url: String,
    root_dir: PathBuf,
    extract_dir: PathBuf,
    source: PathBuf,
    link: PathBuf,
    client: Client,
}

impl ReleaseInstaller {
    /// Create an installer for `language`.
    ///
    /// `source_path` is relative to the install root and `link_target` to
    /// the bin directory.
    #[must_use]
    pub fn new(
        client: Client,
        context: &InstallContext,
        language: &str,
        url: impl Into<String>,
        source_path: &str,
        link_target: &str,
    ) -> Self {
        Self {
            language: language.to_string(),
            url: url.into(),
            root_dir: context.root_dir.clone(),
            extract_dir: context.root_path(language),
            source: context.root_path(source_path),
            link: context.bin_path(link_target),
            client,
        }
    }

    /// Archive URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extracted binary the link points at.
    #[must_use]
    pub fn source_path(&self) -> &std::path::Path {
        &self.source
    }

    /// Link exposed in the bin directory.
    #[must_use]
    pub fn link_path(&self) -> &std::path::Path {
        &self.link
    }

    /// Download and unpack unless the binary is present, then link it.
    async fn fetch(&self, force: bool) -> Result<()> {
        let present = tokio::fs::try_exists(&self.source).await.unwrap_or(false);
        if present && !force {
            debug!(language = %self.language, source = ?self.source, "Release already extracted");
        } else {
            self.download_and_extract().await?;
        }

        force_symlink(&self.source, &self.link).await?;
        info!(language = %self.language, link = ?self.link, "Linked language server");
        Ok(())
    }

    async fn download_and_extract(&self) -> Result<()> {
        info!(language = %self.language, url = %self.url, "Fetching release archive");

        tokio::fs::create_dir_all(&self.root_dir)
            .await
            .map_err(|e| Error::io(e, &self.root_dir, "create directory"))?;
        let archive = tempfile::Builder::new()
            .prefix(".lspup-")
            .suffix(".tar.gz")
            .tempfile_in(&self.root_dir)
            .map_err(|e| Error::io(e, &self.root_dir, "create temp file"))?;

        download_to(&self.client, &self.url, archive.path()).await?;

        let archive_path = archive.path().to_path_buf();
        let dest = self.extract_dir.clone();
        tokio::task::spawn_blocking(move || unpack_tar_gz(&archive_path, &dest))
            .await
            .map_err(|e| Error::extraction(&self.extract_dir, e.to_string()))??;

        archive
            .close()
            .map_err(|e| Error::io(e, &self.root_dir, "remove temp file"))?;
        debug!(language = %self.language, dir = ?self.extract_dir, "Release extracted");
        Ok(())
    }
}

#[async_trait]
impl Installer for ReleaseInstaller {
    fn language(&self) -> &str {
        &self.language
    }

    fn mode(&self) -> InstallMode {
        InstallMode::ReleaseArchive
    }

    async fn install(&self) -> Result<()> {
        self.fetch(false).await
    }

    async fn update(&self) -> Result<()> {
        self.fetch(true).await
    }
}
