//! Tracing configuration for the lspup CLI.

use std::io;
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events pass the default filter.
const CRATES: &[&str] = &[
    "lspup",
    "lspup_core",
    "lspup_tools_npm",
    "lspup_tools_github",
    "lspup_tools_go",
];

/// Tracing output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
}

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above
    Info,
    /// Show warnings and above (default)
    Warn,
    /// Show errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format.
    pub format: TracingFormat,
    /// Level applied to lspup crates unless `RUST_LOG` is set.
    pub level: Level,
}

/// Filter directive enabling `level` for every lspup crate.
#[must_use]
pub fn default_directive(level: Level) -> String {
    let level_str = level.as_str().to_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level_str}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` if it parses, otherwise [`default_directive`] for `level`.
fn env_filter(level: Level) -> miette::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))
}

/// Initialize tracing with the given configuration
///
/// # Errors
///
/// Returns an error if no filter can be built or a subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> miette::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config.level)?);

    match config.format {
        TracingFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true);

            registry.with(layer).try_init()
        }
        TracingFormat::Compact => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false);

            registry.with(layer).try_init()
        }
        TracingFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true);

            registry.with(layer).try_init()
        }
    }
    .map_err(|e| miette::miette!("Failed to install tracing subscriber: {e}"))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_default_directive_covers_all_crates() {
        let directive = default_directive(Level::INFO);
        assert!(directive.starts_with("lspup=info,"));
        assert!(directive.contains("lspup_tools_github=info"));
        assert_eq!(directive.split(',').count(), CRATES.len());
        assert!(EnvFilter::try_new(directive).is_ok());
    }

    #[test]
    fn test_env_filter_builds_for_every_level() {
        for level in [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert!(env_filter(level.into()).is_ok());
        }
    }
}
