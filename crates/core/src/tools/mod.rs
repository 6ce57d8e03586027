//! Language server registry and installer abstraction.
//!
//! # Architecture
//!
//! - [`ServerDescriptor`] / [`InstallMode`] - how one language's server is installed
//! - [`AssetDescriptor`] - template data for a GitHub release download URL
//! - [`servers`], [`lookup_server`], [`lookup_asset`] - the static registries
//! - [`Installer`] - implemented by each install procedure crate (npm, github, go)
//! - [`InstallContext`] - directories and programs shared by one invocation
//!
//! # Example
//!
//! ```ignore
//! use lspup_core::tools::{lookup_server, InstallContext};
//!
//! let server = lookup_server("vim").unwrap();
//! let installer = NpmInstaller::new(context, "vim", server);
//! installer.install().await?;
//! ```

mod asset;
mod provider;
mod registry;

pub use asset::{ASSETS, AssetDescriptor, lookup_asset, release_url};
pub use provider::{InstallContext, InstallMode, Installer, Operation, ServerDescriptor};
pub use registry::{SERVERS, lookup_server, servers};
