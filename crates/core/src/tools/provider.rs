//! Installer trait and the descriptor types it is built from.
//!
//! Each install procedure crate (npm, GitHub releases, the Go toolchain)
//! implements [`Installer`] so the orchestrator can drive them uniformly.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::Result;

/// How a language server gets onto the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallMode {
    /// Project-local dev dependency managed by npm.
    PackageManager,
    /// Versioned tarball from a GitHub release.
    ReleaseArchive,
    /// The language toolchain's own "install latest" command.
    Toolchain,
}

impl InstallMode {
    /// Short name used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PackageManager => "npm",
            Self::ReleaseArchive => "release",
            Self::Toolchain => "toolchain",
        }
    }
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one language's server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerDescriptor {
    /// Package (or module path) handed to the installing tool.
    pub package_name: &'static str,
    /// Install strategy.
    pub mode: InstallMode,
    /// Binary location after extraction, relative to the install root.
    ///
    /// Required for [`InstallMode::ReleaseArchive`].
    pub source_path: Option<&'static str>,
    /// Link name, relative to the bin directory.
    ///
    /// Required for [`InstallMode::ReleaseArchive`].
    pub link_target: Option<&'static str>,
    /// Executable name when it differs from the package name.
    pub bin_name: Option<&'static str>,
}

impl ServerDescriptor {
    /// Descriptor for an npm-managed server.
    #[must_use]
    pub const fn npm(package_name: &'static str) -> Self {
        Self {
            package_name,
            mode: InstallMode::PackageManager,
            source_path: None,
            link_target: None,
            bin_name: None,
        }
    }

    /// Descriptor for a server unpacked from a release archive.
    #[must_use]
    pub const fn release(
        package_name: &'static str,
        source_path: &'static str,
        link_target: &'static str,
    ) -> Self {
        Self {
            package_name,
            mode: InstallMode::ReleaseArchive,
            source_path: Some(source_path),
            link_target: Some(link_target),
            bin_name: None,
        }
    }

    /// Descriptor for a server installed by the language toolchain.
    #[must_use]
    pub const fn toolchain(package_name: &'static str) -> Self {
        Self {
            package_name,
            mode: InstallMode::Toolchain,
            source_path: None,
            link_target: None,
            bin_name: None,
        }
    }

    /// Override the executable name.
    #[must_use]
    pub const fn with_bin(mut self, bin_name: &'static str) -> Self {
        self.bin_name = Some(bin_name);
        self
    }

    /// Executable name: `bin_name` if set, else the package name.
    #[must_use]
    pub fn executable(&self) -> &'static str {
        self.bin_name.unwrap_or(self.package_name)
    }
}

/// Requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// First-time install; skips work that is already done.
    Install,
    /// Refresh to the latest configured version.
    Update,
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "install" => Ok(Self::Install),
            "update" => Ok(Self::Update),
            _ => Err(format!("Unknown mode: {s}")),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Install => f.write_str("install"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Directories and programs shared by every installer in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    /// Install root: holds `node_modules` and per-language extraction dirs.
    pub root_dir: PathBuf,
    /// Directory the executables are linked into.
    pub bin_dir: PathBuf,
    /// Package manager program.
    pub npm_program: String,
    /// Go toolchain program.
    pub go_program: String,
}

impl InstallContext {
    /// Create a context with the default `npm` and `go` programs.
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            bin_dir: bin_dir.into(),
            npm_program: "npm".to_string(),
            go_program: "go".to_string(),
        }
    }

    /// Set the package manager program.
    #[must_use]
    pub fn with_npm_program(mut self, program: impl Into<String>) -> Self {
        self.npm_program = program.into();
        self
    }

    /// Set the Go program.
    #[must_use]
    pub fn with_go_program(mut self, program: impl Into<String>) -> Self {
        self.go_program = program.into();
        self
    }

    /// Path below the install root.
    #[must_use]
    pub fn root_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root_dir.join(relative)
    }

    /// Path below the bin directory.
    #[must_use]
    pub fn bin_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.bin_dir.join(relative)
    }
}

/// Install and update operations for one language's server.
///
/// Implementations hold everything they need, so both operations take no
/// arguments. They are run concurrently with other installers and must not
/// share mutable state.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Registry key this installer was built for.
    fn language(&self) -> &str;

    /// Install strategy, for logging.
    fn mode(&self) -> InstallMode;

    /// Install the server and link its executable.
    async fn install(&self) -> Result<()>;

    /// Update an installed server.
    async fn update(&self) -> Result<()>;

    /// Run `operation`.
    async fn run(&self, operation: Operation) -> Result<()> {
        match operation {
            Operation::Install => self.install().await,
            Operation::Update => self.update().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parse() {
        assert_eq!("install".parse::<Operation>(), Ok(Operation::Install));
        assert_eq!("update".parse::<Operation>(), Ok(Operation::Update));
        assert!("Install".parse::<Operation>().is_err());
        assert!("remove".parse::<Operation>().is_err());
    }

    #[test]
    fn test_executable_defaults_to_package() {
        let vim = ServerDescriptor::npm("vim-language-server");
        assert_eq!(vim.executable(), "vim-language-server");

        let css = ServerDescriptor::npm("vscode-langservers-extracted")
            .with_bin("vscode-css-language-server");
        assert_eq!(css.executable(), "vscode-css-language-server");
    }

    #[test]
    fn test_release_descriptor_has_paths() {
        let lua = ServerDescriptor::release("lua-language-server", "lua/bin/x", "x");
        assert_eq!(lua.mode, InstallMode::ReleaseArchive);
        assert_eq!(lua.source_path, Some("lua/bin/x"));
        assert_eq!(lua.link_target, Some("x"));
    }

    #[test]
    fn test_context_paths() {
        let ctx = InstallContext::new("/opt/lspup", "/home/u/.local/bin").with_npm_program("pnpm");
        assert_eq!(ctx.root_path("lua"), PathBuf::from("/opt/lspup/lua"));
        assert_eq!(
            ctx.bin_path("gopls"),
            PathBuf::from("/home/u/.local/bin/gopls")
        );
        assert_eq!(ctx.npm_program, "pnpm");
        assert_eq!(ctx.go_program, "go");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(InstallMode::PackageManager.to_string(), "npm");
        assert_eq!(InstallMode::ReleaseArchive.to_string(), "release");
        assert_eq!(InstallMode::Toolchain.to_string(), "toolchain");
    }
}
