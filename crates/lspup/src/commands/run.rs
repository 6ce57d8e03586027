//! Install/update orchestration.
//!
//! Resolves language tokens to installers, runs the requested operation on
//! all of them concurrently and waits for every one to finish. Failures do
//! not stop the other installers; they are collected into a [`RunReport`].

use crate::builder::InstallerBuilder;
use crate::cli::CliError;
use futures::future::join_all;
use indexmap::IndexSet;
use lspup_core::Error;
use lspup_core::tools::{InstallContext, Installer, Operation, lookup_server, servers};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Token that selects every registered language.
pub const ALL: &str = "all";

/// Outcome of running one operation across installers.
#[derive(Debug)]
pub struct RunReport {
    /// Operation that was run.
    pub operation: Operation,
    /// Languages whose operation succeeded, in request order.
    pub succeeded: Vec<String>,
    /// Languages whose operation failed, with the error.
    pub failures: Vec<(String, Error)>,
}

impl RunReport {
    /// Whether every installer succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary of the failures.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        let languages: Vec<_> = self.failures.iter().map(|(l, _)| l.as_str()).collect();
        format!(
            "{} of {} language servers failed to {}: {}",
            self.failures.len(),
            self.failures.len() + self.succeeded.len(),
            self.operation,
            languages.join(", ")
        )
    }
}

/// Expand `all`, drop unknown tokens and duplicates, keeping first-seen order.
#[must_use]
pub fn select_languages(tokens: &[String]) -> Vec<&'static str> {
    let mut selected: IndexSet<&'static str> = IndexSet::new();
    for token in tokens {
        if token == ALL {
            selected.extend(servers().map(|(key, _)| key));
        } else if let Some((key, _)) = servers().find(|(key, _)| *key == token.as_str()) {
            selected.insert(key);
        } else {
            debug!(language = %token, "Unknown language, skipping");
        }
    }
    selected.into_iter().collect()
}

/// Build installers for the requested tokens, silently dropping the rest.
#[must_use]
pub fn resolve_installers(builder: &InstallerBuilder, tokens: &[String]) -> Vec<Arc<dyn Installer>> {
    select_languages(tokens)
        .into_iter()
        .filter_map(|language| {
            let server = lookup_server(language)?;
            builder.build(language, server)
        })
        .collect()
}

/// Run `operation` on every installer concurrently and wait for all of them.
pub async fn run_all(installers: &[Arc<dyn Installer>], operation: Operation) -> RunReport {
    let results = join_all(installers.iter().map(|installer| async move {
        let language = installer.language().to_string();
        info!(%language, mode = %installer.mode(), %operation, "Starting");
        let result = installer.run(operation).await;
        match &result {
            Ok(()) => info!(%language, %operation, "Done"),
            Err(e) => error!(%language, %operation, error = %e, "Failed"),
        }
        (language, result)
    }))
    .await;

    let mut report = RunReport {
        operation,
        succeeded: Vec::new(),
        failures: Vec::new(),
    };
    for (language, result) in results {
        match result {
            Ok(()) => report.succeeded.push(language),
            Err(e) => report.failures.push((language, e)),
        }
    }
    report
}

async fn prepare_directories(context: &InstallContext) -> Result<(), CliError> {
    for dir in [&context.root_dir, &context.bin_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::io(e, dir, "create directory"))?;
    }
    Ok(())
}

/// Execute `install` or `update` for the given language tokens.
///
/// # Errors
///
/// Returns a usage error if no token resolves to an installer, and an
/// install error if any installer fails while `strict` is set.
pub async fn execute_run(
    context: InstallContext,
    operation: Operation,
    tokens: &[String],
    strict: bool,
) -> Result<RunReport, CliError> {
    let builder = InstallerBuilder::new(context)?;
    let installers = resolve_installers(&builder, tokens);
    if installers.is_empty() {
        let known: Vec<_> = servers().map(|(key, _)| key).collect();
        return Err(CliError::usage_with_help(
            "No valid language",
            format!("Known languages: {}, or {ALL}", known.join(", ")),
        ));
    }

    prepare_directories(builder.context()).await?;
    let report = run_all(&installers, operation).await;

    if strict && !report.is_success() {
        return Err(CliError::install_with_help(
            report.failure_summary(),
            "Run with -L debug for command output",
        ));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lspup_core::tools::{InstallMode, SERVERS};
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Mutex;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    struct MockInstaller {
        language: &'static str,
        fail: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Installer for MockInstaller {
        fn language(&self) -> &str {
            self.language
        }

        fn mode(&self) -> InstallMode {
            InstallMode::PackageManager
        }

        async fn install(&self) -> lspup_core::Result<()> {
            self.calls.lock().unwrap().push(format!("install {}", self.language));
            if self.fail {
                return Err(Error::command("npm", vec![], "boom"));
            }
            Ok(())
        }

        async fn update(&self) -> lspup_core::Result<()> {
            self.calls.lock().unwrap().push(format!("update {}", self.language));
            Ok(())
        }
    }

    #[test]
    fn test_select_all() {
        let all: Vec<_> = SERVERS.iter().map(|(k, _)| *k).collect();
        assert_eq!(select_languages(&tokens(&["all"])), all);
    }

    #[test]
    fn test_select_drops_unknown_and_duplicates() {
        assert_eq!(
            select_languages(&tokens(&["vim", "doesnotexist", "vim", "go"])),
            vec!["vim", "go"]
        );
        assert!(select_languages(&tokens(&["doesnotexist"])).is_empty());
    }

    #[test]
    fn test_select_all_after_explicit_keeps_first_position() {
        let selected = select_languages(&tokens(&["json", "all"]));
        assert_eq!(selected[0], "json");
        assert_eq!(selected.len(), SERVERS.len());
    }

    #[test]
    fn test_resolve_all_matches_build_all() {
        let builder = InstallerBuilder::with_client(
            InstallContext::new("/tmp/r", "/tmp/b"),
            reqwest::Client::new(),
        );
        let resolved: Vec<_> = resolve_installers(&builder, &tokens(&["all"]))
            .iter()
            .map(|i| i.language().to_string())
            .collect();
        let built: Vec<_> = builder
            .build_all()
            .iter()
            .map(|i| i.language().to_string())
            .collect();
        assert_eq!(resolved, built);
    }

    #[tokio::test]
    async fn test_run_all_collects_failures() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let installers: Vec<Arc<dyn Installer>> = vec![
            Arc::new(MockInstaller {
                language: "vim",
                fail: false,
                calls: calls.clone(),
            }),
            Arc::new(MockInstaller {
                language: "bash",
                fail: true,
                calls: calls.clone(),
            }),
        ];

        let report = run_all(&installers, Operation::Install).await;

        assert_eq!(report.succeeded, vec!["vim".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "bash");
        assert!(!report.is_success());
        assert_eq!(
            report.failure_summary(),
            "1 of 2 language servers failed to install: bash"
        );
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_all_dispatches_operation() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let installers: Vec<Arc<dyn Installer>> = vec![Arc::new(MockInstaller {
            language: "python",
            fail: false,
            calls: calls.clone(),
        })];

        let report = run_all(&installers, Operation::Update).await;

        assert!(report.is_success());
        assert_eq!(*calls.lock().unwrap(), vec!["update python".to_string()]);
    }

    #[tokio::test]
    async fn test_no_valid_language_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let context = InstallContext::new(dir.path().join("root"), dir.path().join("bin"));

        let err = execute_run(context, Operation::Install, &tokens(&["doesnotexist"]), false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No valid language");
        assert!(!dir.path().join("root").exists());
        assert!(!dir.path().join("bin").exists());
    }

    fn fake_go(dir: &std::path::Path, exit: i32) -> (String, std::path::PathBuf) {
        let log = dir.join("go.log");
        let script = dir.join("fake-go");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> {}\nexit {exit}\n", log.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        (script.to_string_lossy().into_owned(), log)
    }

    #[tokio::test]
    async fn test_update_go_runs_go_install() {
        let dir = tempfile::tempdir().unwrap();
        let (go, log) = fake_go(dir.path(), 0);
        let context = InstallContext::new(dir.path().join("root"), dir.path().join("bin"))
            .with_go_program(go);

        let report = execute_run(context, Operation::Update, &tokens(&["go"]), true)
            .await
            .unwrap();

        assert_eq!(report.succeeded, vec!["go".to_string()]);
        assert_eq!(
            std::fs::read_to_string(log).unwrap(),
            "install golang.org/x/tools/gopls@latest\n"
        );
        assert!(dir.path().join("bin").is_dir());
    }

    #[tokio::test]
    async fn test_failure_is_reported_but_not_fatal_unless_strict() {
        let dir = tempfile::tempdir().unwrap();
        let (go, _) = fake_go(dir.path(), 1);
        let context = InstallContext::new(dir.path().join("root"), dir.path().join("bin"))
            .with_go_program(go);

        let report = execute_run(context.clone(), Operation::Install, &tokens(&["go"]), false)
            .await
            .unwrap();
        assert_eq!(report.failures.len(), 1);

        let err = execute_run(context, Operation::Install, &tokens(&["go"]), true)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Install { .. }));
        assert_eq!(crate::cli::exit_code_for(&err), crate::cli::EXIT_FAILURE);
    }
}
