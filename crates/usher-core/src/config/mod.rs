//! Configuration types for Usher.
//!
//! Everything is loaded from a single YAML file (`usher.yaml`). Every section
//! has defaults, so an empty file is a valid configuration pointing at a local
//! Postgres database.

pub mod dashboard;
pub mod store;
pub mod upstream;

use crate::user::UserRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub use dashboard::{DashboardConfig, EditFormConfig};
pub use store::{StoreBackend, StoreConfig};
pub use upstream::{ConnectionPoolConfig, UpstreamConfig};

static SQL_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier pattern is valid")
});

/// Complete Usher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsherConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Postgres connection.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// User store backend and table names.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard server and page settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Rules checked before an account is activated.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// External edit form. Absent disables the edit action.
    #[serde(default)]
    pub edit_form: Option<EditFormConfig>,

    /// Initial records for the memory backend.
    #[serde(default)]
    pub seed_users: Vec<UserRecord>,
}

/// Validation rules for user records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// An account can only be activated once its email is verified.
    #[serde(default)]
    pub require_verified_email: bool,

    #[serde(default = "default_max_username_length")]
    pub max_username_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_verified_email: false,
            max_username_length: default_max_username_length(),
        }
    }
}

fn default_max_username_length() -> usize {
    150
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UsherConfig {
    /// Load and check configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and check configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Reject values that would produce broken SQL or a dead UI.
    pub fn check(&self) -> Result<(), ConfigError> {
        for (key, ident) in self.store.identifiers() {
            if !SQL_IDENTIFIER.is_match(ident) {
                return Err(ConfigError::Config(format!(
                    "{key} '{ident}' is not a valid SQL identifier"
                )));
            }
        }

        if let Some(form) = &self.edit_form
            && !form.url_template.contains("{id}")
        {
            return Err(ConfigError::Config(
                "edit_form.url_template must contain '{id}'".to_string(),
            ));
        }

        if self.validation.max_username_length == 0 {
            return Err(ConfigError::Config(
                "validation.max_username_length must be positive".to_string(),
            ));
        }

        if !self.seed_users.is_empty() && self.store.backend != StoreBackend::Memory {
            tracing::warn!("seed_users is ignored unless store.backend is 'memory'");
        }

        Ok(())
    }

    /// Project name, falling back to the binary name.
    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or("usher")
    }
}
