//! HTTP download of release assets.

use lspup_core::{Error, Result};
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Build the HTTP client shared by every release installer.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("lspup/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))
}

/// Token for authenticated GitHub downloads, if one is set.
fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .ok()
        .filter(|t| !t.is_empty())
}

/// Stream `url` into the file at `dest`.
///
/// # Errors
///
/// Returns an error on connection failure, a non-success status, or a
/// failed write.
pub async fn download_to(client: &Client, url: &str, dest: &Path) -> Result<()> {
    debug!(%url, dest = ?dest, "Downloading release asset");

    let mut request = client.get(url);
    if url.starts_with("https://github.com/") {
        if let Some(token) = github_token() {
            request = request.bearer_auth(token);
        }
    }

    let mut response = request
        .send()
        .await
        .map_err(|e| Error::download(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::download(url, format!("HTTP {}", response.status())));
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| Error::io(e, dest, "create"))?;
    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| Error::download(url, e.to_string()))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::io(e, dest, "write"))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| Error::io(e, dest, "write"))?;

    debug!(%url, bytes = written, "Download complete");
    Ok(())
}
