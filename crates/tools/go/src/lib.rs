//! Go toolchain install procedure for lspup.
//!
//! Runs `go install <module>@latest`. The Go module cache makes repeated
//! runs cheap, so install and update are the same operation. The binary
//! lands wherever the toolchain puts it (`GOBIN`, or `$GOPATH/bin`).

use async_trait::async_trait;
use lspup_core::Result;
use lspup_core::process;
use lspup_core::tools::{InstallContext, InstallMode, Installer, ServerDescriptor};
use tracing::info;

/// Installer for a server fetched with `go install`.
pub struct GoInstaller {
    language: String,
    module: String,
    go: String,
}

impl GoInstaller {
    /// Create an installer for `language` described by `server`.
    #[must_use]
    pub fn new(context: &InstallContext, language: &str, server: &ServerDescriptor) -> Self {
        Self {
            language: language.to_string(),
            module: server.package_name.to_string(),
            go: context.go_program.clone(),
        }
    }

    /// Argument passed to `go install`.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}@latest", self.module)
    }

    async fn go_install(&self) -> Result<()> {
        let target = self.target();
        info!(language = %self.language, %target, "Running go install");
        process::run(&self.go, &["install", &target], None).await
    }
}

#[async_trait]
impl Installer for GoInstaller {
    fn language(&self) -> &str {
        &self.language
    }

    fn mode(&self) -> InstallMode {
        InstallMode::Toolchain
    }

    async fn install(&self) -> Result<()> {
        self.go_install().await
    }

    async fn update(&self) -> Result<()> {
        self.go_install().await
    }
}
