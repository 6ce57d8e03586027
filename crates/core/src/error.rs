//! Error types shared by every lspup crate.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for lspup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing or updating a language server.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Invalid settings or registry data.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(lspup::config))]
    Configuration {
        /// The error message.
        message: String,
        /// Optional help text.
        #[help]
        help: Option<String>,
    },

    /// An external program could not be started or exited unsuccessfully.
    #[error("Command `{program}` failed: {message}")]
    #[diagnostic(code(lspup::command))]
    Command {
        /// Program that was run.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
        /// Captured stderr or spawn error.
        message: String,
        /// Optional help text.
        #[help]
        help: Option<String>,
    },

    /// A release archive could not be fetched.
    #[error("Download of {url} failed: {message}")]
    #[diagnostic(
        code(lspup::download),
        help("Check your network connection and that the release still exists")
    )]
    Download {
        /// Requested URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// A release archive could not be unpacked.
    #[error("Failed to extract archive into {}: {message}", .path.display())]
    #[diagnostic(code(lspup::extraction))]
    Extraction {
        /// Extraction directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Filesystem operation failed.
    #[error("I/O {operation} failed{}: {source}", on_path(.path.as_deref()))]
    #[diagnostic(code(lspup::io))]
    Io {
        /// Underlying error.
        #[source]
        source: std::io::Error,
        /// Path involved, if known.
        path: Option<PathBuf>,
        /// Short name of the operation ("symlink", "create directory", ...).
        operation: String,
    },
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: None,
        }
    }

    /// Create a command failure.
    #[must_use]
    pub fn command(
        program: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Command {
            program: program.into(),
            args,
            message: message.into(),
            help: None,
        }
    }

    /// Create a command failure for a program that could not be spawned.
    #[must_use]
    pub fn command_not_found(program: impl Into<String>, args: Vec<String>, err: &std::io::Error) -> Self {
        let program = program.into();
        Self::Command {
            help: Some(format!("Make sure `{program}` is installed and on PATH")),
            message: format!("could not start: {err}"),
            program,
            args,
        }
    }

    /// Create a download error.
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the operation and path it came from.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
            operation: operation.into(),
        }
    }
}

fn on_path(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| format!(" on {}", p.display()))
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "operation".to_string(),
        }
    }
}
