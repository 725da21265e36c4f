//! Dashboard application state.

use crate::controller::Dashboard;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use usher_core::{DashboardConfig, UserStore};

/// How the dashboard presents itself in the page chrome and menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInfo {
    /// DOM id of the dashboard container.
    pub uid: &'static str,
    pub title: String,
    /// Menu the entry belongs to.
    pub menu: &'static str,
    /// Font Awesome icon of the menu entry.
    pub menu_icon: &'static str,
    pub menu_order: u32,
}

impl WidgetInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: "dashboard-app",
            title: title.into(),
            menu: "user",
            menu_icon: "clipboard",
            menu_order: 10,
        }
    }
}

impl Default for WidgetInfo {
    fn default() -> Self {
        Self::new("Requests")
    }
}

/// Who may use the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Header carrying the caller's comma-separated groups.
    pub groups_header: String,
    /// Allowed groups; empty allows everyone.
    pub authorized_groups: Vec<String>,
}

impl AccessPolicy {
    /// Whether a caller presenting `groups` may proceed.
    pub fn allows(&self, groups: Option<&str>) -> bool {
        if self.authorized_groups.is_empty() {
            return true;
        }
        groups
            .map(|groups| {
                groups
                    .split(',')
                    .map(str::trim)
                    .any(|g| self.authorized_groups.iter().any(|a| a == g))
            })
            .unwrap_or(false)
    }
}

/// Shared application state for the dashboard.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The controller; every interaction holds this lock until it completes.
    dashboard: Mutex<Dashboard>,
    /// Read-only access for the JSON API.
    store: Arc<dyn UserStore>,
    widget: WidgetInfo,
    access: AccessPolicy,
}

impl AppState {
    /// Create a new application state.
    pub fn new(dashboard: Dashboard, store: Arc<dyn UserStore>, config: &DashboardConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                dashboard: Mutex::new(dashboard),
                store,
                widget: WidgetInfo::new(config.title.clone()),
                access: AccessPolicy {
                    groups_header: config.groups_header.to_ascii_lowercase(),
                    authorized_groups: config.authorized_groups.clone(),
                },
            }),
        }
    }

    /// Lock the controller for one interaction.
    pub async fn dashboard(&self) -> MutexGuard<'_, Dashboard> {
        self.inner.dashboard.lock().await
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.inner.store
    }

    pub fn widget(&self) -> &WidgetInfo {
        &self.inner.widget
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.inner.access
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(groups: &[&str]) -> AccessPolicy {
        AccessPolicy {
            groups_header: "x-forwarded-groups".to_string(),
            authorized_groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_open_policy_allows_everyone() {
        assert!(policy(&[]).allows(None));
    }

    #[test]
    fn test_policy_matches_any_listed_group() {
        let policy = policy(&["superuser"]);
        assert!(policy.allows(Some("staff, superuser")));
        assert!(!policy.allows(Some("staff")));
        assert!(!policy.allows(Some("superusers")));
        assert!(!policy.allows(None));
    }
}
