//! `usher check` command implementation.
//!
//! Validates a configuration file before it is served:
//! - YAML parsing and SQL identifier checks
//! - Credential sources that are referenced but missing
//! - Access control and seed data sanity
//! - Optionally, a live connection to the user store

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use usher_core::{StoreBackend, UserValidator, UsherConfig};

use super::serve::build_store;

// ============================================================================
// Check Result Types
// ============================================================================

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Configuration section the finding is about.
    pub category: String,
    pub message: String,
}

impl CheckFinding {
    fn error(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    fn warning(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    fn info(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    fn new(severity: Severity, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    fn add(&mut self, finding: CheckFinding) {
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Print human-readable summary.
    pub fn print_summary(&self) {
        for (severity, heading) in [
            (Severity::Error, "Errors"),
            (Severity::Warning, "Warnings"),
            (Severity::Info, "Info"),
        ] {
            let mut findings: Vec<_> = self
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            if findings.is_empty() {
                continue;
            }
            findings.sort_by(|a, b| a.category.cmp(&b.category));

            println!("\n{} ({}):", heading, findings.len());
            println!("{}", "─".repeat(60));
            for finding in findings {
                println!("  {} [{}]: {}", finding.severity, finding.category, finding.message);
            }
        }

        println!();
        println!("{}", "═".repeat(60));
        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        if errors == 0 && warnings == 0 {
            println!("All checks passed!");
        } else {
            println!("Summary: {errors} error(s), {warnings} warning(s)");
            if errors > 0 {
                println!("\nConfiguration has errors that must be fixed.");
            }
        }
    }
}

// ============================================================================
// Main Check Runner
// ============================================================================

/// Run all checks without printing.
///
/// With `connect`, the configured store is opened and the pending list read
/// once.
pub async fn run_quiet(config_path: &Path, connect: bool) -> CheckResults {
    let mut results = CheckResults::default();

    let config = match UsherConfig::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            results.add(CheckFinding::error("config", e.to_string()));
            return results;
        }
    };

    check_upstream(&config, &mut results);
    check_access(&config, &mut results);
    check_seed_users(&config, &mut results);

    if config.edit_form.is_none() {
        results.add(CheckFinding::info("edit_form", "No edit form configured; the edit action stays disabled"));
    }

    if connect {
        match build_store(&config).await {
            Ok(store) => match store.list_pending().await {
                Ok(pending) => results.add(CheckFinding::info(
                    "store",
                    format!("{} user(s) waiting for approval", pending.len()),
                )),
                Err(e) => results.add(CheckFinding::error("store", e.to_string())),
            },
            Err(e) => results.add(CheckFinding::error("store", format!("{e:#}"))),
        }
    }

    results
}

/// Run the `check` command.
pub async fn run(config_path: &Path, connect: bool) -> Result<()> {
    println!("Checking Usher configuration: {}", config_path.display());

    let results = run_quiet(config_path, connect).await;
    results.print_summary();

    if results.has_errors() {
        anyhow::bail!("Configuration check failed");
    }
    Ok(())
}

fn check_upstream(config: &UsherConfig, results: &mut CheckResults) {
    if config.store.backend != StoreBackend::Postgres {
        return;
    }

    let upstream = &config.upstream;
    if !upstream.uses_env_credentials() {
        return;
    }

    if let Some(var) = &upstream.database_url_env
        && upstream.database_url.is_none()
        && std::env::var(var).is_err()
    {
        results.add(CheckFinding::warning(
            "upstream",
            format!("Environment variable {var} is not set; falling back to individual fields"),
        ));
    }

    if let Some(var) = &upstream.password_env
        && upstream.password.is_none()
        && std::env::var(var).is_err()
    {
        results.add(CheckFinding::warning(
            "upstream",
            format!("Environment variable {var} is not set; connecting without a password"),
        ));
    }
}

fn check_access(config: &UsherConfig, results: &mut CheckResults) {
    if !config.dashboard.restricts_access() {
        results.add(CheckFinding::warning(
            "dashboard",
            "authorized_groups is empty; every caller may approve and remove users",
        ));
    }
}

fn check_seed_users(config: &UsherConfig, results: &mut CheckResults) {
    if config.store.backend != StoreBackend::Memory {
        return;
    }

    if config.seed_users.is_empty() {
        results.add(CheckFinding::warning("seed_users", "Memory store starts empty"));
        return;
    }

    let mut ids = HashSet::new();
    let mut usernames = HashSet::new();
    for user in &config.seed_users {
        if !ids.insert(user.id) {
            results.add(CheckFinding::error("seed_users", format!("Duplicate user id {}", user.id)));
        }
        if !usernames.insert(user.username.as_str()) {
            results.add(CheckFinding::error(
                "seed_users",
                format!("Duplicate username '{}'", user.username),
            ));
        }
    }

    let validator = UserValidator::new(config.validation.clone());
    for user in config.seed_users.iter().filter(|u| u.is_pending()) {
        if let Err(errors) = validator.check(&user.activated()) {
            results.add(CheckFinding::info(
                "seed_users",
                format!("'{}' can not be approved yet: {errors}", user.username),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn messages(results: &CheckResults, severity: Severity) -> Vec<&str> {
        results
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_an_error() {
        let file = config_file("store:\n  users_table: \"auth user\"\n");
        let results = run_quiet(file.path(), false).await;
        assert!(results.has_errors());
        assert!(messages(&results, Severity::Error)[0].contains("auth user"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let results = run_quiet(Path::new("/nonexistent/usher.yaml"), false).await;
        assert!(results.has_errors());
    }

    #[tokio::test]
    async fn test_open_dashboard_warns() {
        let file = config_file(
            "store:\n  backend: memory\ndashboard:\n  authorized_groups: []\nseed_users: []\n",
        );
        let results = run_quiet(file.path(), false).await;
        assert!(!results.has_errors());
        let warnings = messages(&results, Severity::Warning);
        assert!(warnings.iter().any(|m| m.contains("authorized_groups is empty")));
        assert!(warnings.iter().any(|m| m.contains("Memory store starts empty")));
    }

    #[tokio::test]
    async fn test_seed_user_checks() {
        let file = config_file(
            r#"
store:
  backend: memory
edit_form:
  url_template: "/admin/users/{id}/edit"
seed_users:
  - id: 1
    date_joined: "2024-01-01T00:00:00Z"
    username: alice
    email: alice@example.com
  - id: 2
    date_joined: "2024-01-02T00:00:00Z"
    username: alice
    email: broken
"#,
        );
        let results = run_quiet(file.path(), false).await;
        assert_eq!(messages(&results, Severity::Error), vec!["Duplicate username 'alice'"]);
        let infos = messages(&results, Severity::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].starts_with("'alice' can not be approved yet"));
    }

    #[tokio::test]
    async fn test_missing_database_url_env_warns() {
        let file = config_file("upstream:\n  database_url_env: USHER_CHECK_TEST_UNSET_URL\n");
        let results = run_quiet(file.path(), false).await;
        assert!(!results.has_errors());
        assert!(
            messages(&results, Severity::Warning)
                .iter()
                .any(|m| m.contains("USHER_CHECK_TEST_UNSET_URL is not set"))
        );
    }

    #[tokio::test]
    async fn test_connect_to_memory_store() {
        let file = config_file(
            r#"
store:
  backend: memory
edit_form:
  url_template: "/admin/users/{id}/edit"
seed_users:
  - id: 1
    date_joined: "2024-01-01T00:00:00Z"
    username: alice
    email: alice@example.com
"#,
        );
        let results = run_quiet(file.path(), true).await;
        assert!(!results.has_errors());
        assert_eq!(
            messages(&results, Severity::Info),
            vec!["1 user(s) waiting for approval"]
        );
    }
}
