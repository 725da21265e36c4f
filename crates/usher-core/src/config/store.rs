//! User store configuration.

use serde::{Deserialize, Serialize};

/// Which `UserStore` implementation backs the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Postgres tables reached through the upstream connection.
    #[default]
    Postgres,
    /// Process memory, seeded from `seed_users`.
    Memory,
}

/// Where user records live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database schema holding both tables.
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Table of user accounts.
    #[serde(default = "default_users_table")]
    pub users_table: String,

    /// Table of email addresses, one row per address, keyed by `user_id`.
    #[serde(default = "default_email_table")]
    pub email_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            schema: default_schema(),
            users_table: default_users_table(),
            email_table: default_email_table(),
        }
    }
}

impl StoreConfig {
    /// Every configured SQL identifier, for validation.
    pub fn identifiers(&self) -> [(&'static str, &str); 3] {
        [
            ("store.schema", self.schema.as_str()),
            ("store.users_table", self.users_table.as_str()),
            ("store.email_table", self.email_table.as_str()),
        ]
    }
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_users_table() -> String {
    "auth_user".to_string()
}

fn default_email_table() -> String {
    "account_emailaddress".to_string()
}
