//! Core types for lspup.
//!
//! This crate holds everything the install procedures and the CLI share:
//!
//! - [`Error`] and [`Result`] - the error type every procedure returns
//! - [`tools`] - the server and asset registries, the [`tools::Installer`] trait
//!   and the [`tools::InstallContext`] an invocation runs in
//! - [`link`] - the force-symlink primitive used to expose binaries
//! - [`paths`] - default locations for the install root and bin directory
//! - [`process`] - running external programs with checked exit status

mod error;
pub mod link;
pub mod paths;
pub mod process;
pub mod tools;

pub use error::{Error, Result};
