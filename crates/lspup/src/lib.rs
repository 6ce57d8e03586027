//! lspup: install and update editor language servers.
//!
//! A language key (`lua`, `vim`, `go`, ...) resolves through the registries
//! in `lspup_core::tools` to one of three install procedures:
//!
//! - npm dev dependency, linked from `node_modules/.bin`
//! - GitHub release tarball, unpacked under the install root and linked
//! - `go install <module>@latest`
//!
//! [`builder::InstallerBuilder`] maps registry entries to installers and
//! [`commands::run`] drives them concurrently.

pub mod builder;
pub mod cli;
pub mod commands;
pub mod tracing;
