//! Dashboard (web UI) configuration.

use serde::{Deserialize, Serialize};

/// Settings for the approval dashboard server and its page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Host to bind the dashboard to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Page title shown in the header and browser tab.
    #[serde(default = "default_title")]
    pub title: String,

    /// Groups allowed to use the dashboard. Empty allows everyone.
    #[serde(default = "default_authorized_groups")]
    pub authorized_groups: Vec<String>,

    /// Request header carrying the caller's comma-separated groups,
    /// set by the fronting proxy.
    #[serde(default = "default_groups_header")]
    pub groups_header: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            title: default_title(),
            authorized_groups: default_authorized_groups(),
            groups_header: default_groups_header(),
        }
    }
}

impl DashboardConfig {
    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether requests must present an authorized group.
    pub fn restricts_access(&self) -> bool {
        !self.authorized_groups.is_empty()
    }
}

/// Optional external edit form for user records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditFormConfig {
    /// URL of the edit form; `{id}` is replaced by the user id.
    pub url_template: String,

    /// Open the form in a new browser tab instead of replacing the dashboard.
    #[serde(default = "default_true")]
    pub open_in_new_tab: bool,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_title() -> String {
    "Requests".to_string()
}

fn default_authorized_groups() -> Vec<String> {
    vec!["superuser".to_string()]
}

fn default_groups_header() -> String {
    "x-forwarded-groups".to_string()
}
