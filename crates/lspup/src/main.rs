//! lspup command-line entry point.

// CLI binary needs to output to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use lspup::cli::{self, CliError, EXIT_FAILURE, EXIT_OK, Request, exit_code_for, render_error};
use lspup::commands::{execute_run, list};
use lspup::tracing::{TracingConfig, init_tracing};
use lspup_core::tools::Operation;

fn main() {
    let cli = cli::parse();

    if let Err(e) = init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    }) {
        eprintln!("Warning: {e}");
    }

    let request = match Request::from_args(cli.mode.as_deref(), &cli.languages) {
        Ok(request) => request,
        Err(e) => {
            render_error(&e);
            std::process::exit(exit_code_for(&e));
        }
    };

    let exit_code = match request {
        Request::List => {
            print!("{}", list::render());
            EXIT_OK
        }
        Request::Run {
            operation,
            languages,
        } => run_with_tokio(&cli, operation, &languages),
    };
    std::process::exit(exit_code);
}

/// Create the tokio runtime and drive the requested operation.
fn run_with_tokio(cli: &cli::Cli, operation: Operation, languages: &[String]) -> i32 {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            return EXIT_FAILURE;
        }
    };

    match rt.block_on(execute_run(
        cli.install_context(),
        operation,
        languages,
        cli.strict,
    )) {
        Ok(report) if report.is_success() => EXIT_OK,
        Ok(report) => {
            render_error(&CliError::install_with_help(
                report.failure_summary(),
                "Pass --strict to exit non-zero on failure",
            ));
            EXIT_OK
        }
        Err(e) => {
            render_error(&e);
            exit_code_for(&e)
        }
    }
}
