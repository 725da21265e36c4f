//! # usher-dashboard
//!
//! Web dashboard for approving user accounts that wait for database access.
//!
//! Operators see every inactive account, oldest first, and can:
//! - Approve a selected account, which activates it once it passes validation
//! - Remove a selected account
//! - Open the account's edit form
//!
//! ## Tech Stack
//!
//! - Axum for HTTP server
//! - Server-rendered HTML fragments
//! - HTMX for interactivity (minimal JS)
//! - Tailwind CSS for styling

pub mod api_types;
pub mod auth;
pub mod controller;
pub mod edit_form;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
pub mod view;

pub use controller::{Activation, ApproveOutcome, Dashboard};
pub use edit_form::{EditForm, EditTarget, UrlEditForm, ViewRegion};
pub use error::DashboardError;
pub use server::DashboardServer;
pub use state::{AccessPolicy, AppState, WidgetInfo};
pub use view::DashboardView;
