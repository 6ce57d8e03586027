//! External command execution.

use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::{Error, Result};

/// Run `program` with `args` in `cwd` and wait for it to exit.
///
/// stdout is logged at debug level. A non-zero exit becomes
/// [`Error::Command`] carrying the captured stderr.
///
/// # Errors
///
/// Returns an error if the program cannot be started or exits unsuccessfully.
pub async fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let owned_args = || args.iter().map(|a| (*a).to_string()).collect::<Vec<_>>();
    debug!(%program, ?args, ?cwd, "Running command");

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| Error::command_not_found(program, owned_args(), &e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!(%program, stdout = %stdout.trim(), "Command output");
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match output.status.code() {
            Some(code) => format!("exit status {code}: {}", stderr.trim()),
            None => format!("terminated by signal: {}", stderr.trim()),
        };
        return Err(Error::command(program, owned_args(), message));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success() {
        run("true", &[], None).await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let err = run("sh", &["-c", "echo boom >&2; exit 3"], None)
            .await
            .unwrap_err();
        match err {
            Error::Command {
                program,
                args,
                message,
                ..
            } => {
                assert_eq!(program, "sh");
                assert_eq!(args.len(), 2);
                assert_eq!(message, "exit status 3: boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = run("lspup-definitely-not-a-program", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Command { help: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_runs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        run("sh", &["-c", "touch marker"], Some(dir.path()))
            .await
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }
}
