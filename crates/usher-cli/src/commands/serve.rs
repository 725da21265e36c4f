//! Serve command for starting the dashboard.
//!
//! `usher serve` - Connect to the user store and serve the approval dashboard.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use usher_adapter_pg::PgUserStore;
use usher_core::{MemoryUserStore, StoreBackend, UserStore, UserValidator, UsherConfig};
use usher_dashboard::{
    AppState, Dashboard, DashboardServer, EditForm, UrlEditForm, ViewRegion,
};

/// Listen address overrides from the command line.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Run the `serve` command.
pub async fn serve(config_path: PathBuf, overrides: ServeOverrides) -> Result<()> {
    let mut config = UsherConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;

    info!(
        config = %config_path.display(),
        project = %config.project_name(),
        "Loading configuration"
    );

    if let Some(host) = overrides.host {
        config.dashboard.host = host;
    }
    if let Some(port) = overrides.port {
        config.dashboard.port = port;
    }

    let store = build_store(&config).await?;
    let edit_form = build_edit_form(&config);

    if !config.dashboard.restricts_access() {
        tracing::warn!("No authorized groups configured; every caller may approve users");
    }

    let dashboard = Dashboard::new(store.clone(), edit_form);
    let state = AppState::new(dashboard, store, &config.dashboard);

    DashboardServer::new(config.dashboard.clone(), state)
        .run()
        .await
        .context("Dashboard server failed")?;

    Ok(())
}

/// Pick the `UserStore` named by `store.backend`.
pub async fn build_store(config: &UsherConfig) -> Result<Arc<dyn UserStore>> {
    let validator = UserValidator::new(config.validation.clone());

    let store: Arc<dyn UserStore> = match config.store.backend {
        StoreBackend::Memory => {
            info!(users = config.seed_users.len(), "Using in-memory user store");
            Arc::new(MemoryUserStore::with_users(
                validator,
                config.seed_users.iter().cloned(),
            ))
        }
        StoreBackend::Postgres => {
            let store = PgUserStore::connect(&config.upstream, &config.store, validator)
                .await
                .context("Failed to connect to the user database")?;
            Arc::new(store)
        }
    };

    Ok(store)
}

/// The configured edit form, if any.
pub fn build_edit_form(config: &UsherConfig) -> Option<Arc<dyn EditForm>> {
    config.edit_form.as_ref().map(|form| {
        let region = if form.open_in_new_tab {
            ViewRegion::NewTab
        } else {
            ViewRegion::Current
        };
        info!(url_template = %form.url_template, "Edit form enabled");
        Arc::new(UrlEditForm::new(form.url_template.clone()).with_region(region)) as Arc<dyn EditForm>
    })
}
