//! Command-line parsing, CLI errors and exit codes.

use clap::Parser;
use lspup_core::paths::{default_bin_dir, default_root_dir};
use lspup_core::tools::{InstallContext, Operation};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::tracing::{LogLevel, TracingFormat};

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// Usage error, or no installable language requested
pub const EXIT_USAGE: i32 = 1;
/// Installer failure (`--strict`) or unexpected error
pub const EXIT_FAILURE: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Bad arguments or nothing to do (exit code 1)
    #[error("{message}")]
    #[diagnostic(code(lspup::cli::usage))]
    Usage {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// One or more installers failed (exit code 3 under `--strict`)
    #[error("{message}")]
    #[diagnostic(code(lspup::cli::install))]
    Install {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(lspup::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new usage error with help text
    #[must_use]
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new install failure with help text
    #[must_use]
    pub fn install_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<lspup_core::Error> for CliError {
    fn from(err: lspup_core::Error) -> Self {
        let help = err.help().map(|h| h.to_string());
        Self::Other {
            message: err.to_string(),
            help,
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Usage { .. } => EXIT_USAGE,
        CliError::Install { .. } | CliError::Other { .. } => EXIT_FAILURE,
    }
}

/// Render an error on stderr with miette
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    #[allow(clippy::print_stderr)]
    {
        eprintln!("{report:?}");
    }
    let _ = io::stderr().flush();
}

/// Install and update editor language servers.
#[derive(Parser, Debug)]
#[command(name = "lspup", version, about = "Install and update editor language servers")]
pub struct Cli {
    /// `install`, `update` or `list`.
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,

    /// Languages to act on; `all` selects every known language.
    #[arg(value_name = "LANGUAGE")]
    pub languages: Vec<String>,

    /// Install root holding node_modules and extracted releases.
    #[arg(long, env = "LSPUP_HOME", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory language server executables are linked into.
    #[arg(long, env = "LSPUP_BIN_DIR", value_name = "DIR")]
    pub bin_dir: Option<PathBuf>,

    /// Package manager program.
    #[arg(long, env = "LSPUP_NPM", default_value = "npm", value_name = "PROGRAM")]
    pub npm: String,

    /// Go toolchain program.
    #[arg(long, env = "LSPUP_GO", default_value = "go", value_name = "PROGRAM")]
    pub go: String,

    /// Exit non-zero when any installer fails.
    #[arg(
        long,
        env = "LSPUP_STRICT",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub strict: bool,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(long, default_value = "compact", value_enum)]
    pub log_format: TracingFormat,
}

impl Cli {
    /// Directories and programs for this invocation, with defaults applied.
    #[must_use]
    pub fn install_context(&self) -> InstallContext {
        let root = self.root.clone().unwrap_or_else(default_root_dir);
        let bin = self.bin_dir.clone().unwrap_or_else(default_bin_dir);
        InstallContext::new(root, bin)
            .with_npm_program(&self.npm)
            .with_go_program(&self.go)
    }
}

/// What the positional arguments ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Print the server registry.
    List,
    /// Run `operation` for the given language tokens.
    Run {
        /// Requested operation.
        operation: Operation,
        /// Raw language tokens, possibly including `all`.
        languages: Vec<String>,
    },
}

impl Request {
    /// Interpret the mode token and language tokens.
    ///
    /// # Errors
    ///
    /// Returns a usage error when no arguments are given, no language
    /// follows the mode, or the mode is unknown.
    pub fn from_args(mode: Option<&str>, languages: &[String]) -> Result<Self, CliError> {
        let Some(mode) = mode else {
            return Err(CliError::usage_with_help(
                "No argument",
                "Usage: lspup <install|update> <LANGUAGE...|all>",
            ));
        };

        if mode == "list" {
            return Ok(Self::List);
        }

        if languages.is_empty() {
            return Err(CliError::usage_with_help(
                "Missing arguments",
                "Usage: lspup <install|update> <LANGUAGE...|all>",
            ));
        }

        let operation: Operation = mode.parse().map_err(|e: String| {
            CliError::usage_with_help(e, "Expected one of: install, update, list")
        })?;

        Ok(Self::Run {
            operation,
            languages: languages.to_vec(),
        })
    }
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_no_argument() {
        let err = Request::from_args(None, &[]).unwrap_err();
        assert_eq!(err.to_string(), "No argument");
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_missing_languages() {
        let err = Request::from_args(Some("install"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Missing arguments");
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_unknown_mode() {
        let err = Request::from_args(Some("remove"), &tokens(&["lua"])).unwrap_err();
        assert_eq!(err.to_string(), "Unknown mode: remove");
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_mode_without_languages_is_missing_arguments() {
        let err = Request::from_args(Some("remove"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Missing arguments");
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_strict_flag() {
        assert!(!Cli::parse_from(["lspup", "install", "go"]).strict);
        assert!(Cli::parse_from(["lspup", "--strict", "install", "go"]).strict);
    }

    #[test]
    fn test_run_request() {
        let request = Request::from_args(Some("update"), &tokens(&["go", "lua"])).unwrap();
        assert_eq!(
            request,
            Request::Run {
                operation: Operation::Update,
                languages: tokens(&["go", "lua"]),
            }
        );
    }

    #[test]
    fn test_list_request_ignores_languages() {
        assert_eq!(Request::from_args(Some("list"), &[]).unwrap(), Request::List);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(EXIT_OK, 0);
        assert_eq!(exit_code_for(&CliError::usage_with_help("x", "y")), EXIT_USAGE);
        let io_error = std::io::Error::other("disk full");
        let other = CliError::from(lspup_core::Error::io(io_error, "/tmp", "write"));
        assert_eq!(exit_code_for(&other), EXIT_FAILURE);
        assert_eq!(
            exit_code_for(&CliError::install_with_help("x", "y")),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_core_error_conversion_keeps_help() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let core = lspup_core::Error::command_not_found("npm", vec![], &io_error);
        let err = CliError::from(core);
        match err {
            CliError::Other { message, help } => {
                assert!(message.contains("npm"));
                assert!(help.unwrap().contains("PATH"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_install_context_from_flags() {
        let cli = Cli::parse_from([
            "lspup",
            "--root",
            "/srv/lsp",
            "--bin-dir",
            "/srv/bin",
            "--npm",
            "pnpm",
            "install",
            "vim",
        ]);
        let ctx = cli.install_context();
        assert_eq!(ctx.root_dir, PathBuf::from("/srv/lsp"));
        assert_eq!(ctx.bin_dir, PathBuf::from("/srv/bin"));
        assert_eq!(ctx.npm_program, "pnpm");
        assert_eq!(cli.mode.as_deref(), Some("install"));
        assert_eq!(cli.languages, tokens(&["vim"]));
    }
}
