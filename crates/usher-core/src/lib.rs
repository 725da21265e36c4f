//! # usher-core
//!
//! Shared building blocks for the Usher approval dashboard:
//! - user record types and the pending-list value object
//! - the `UserStore` trait every backend implements
//! - validation rules applied before an account is activated
//! - an in-memory store used for demos and tests
//! - YAML configuration types

pub mod config;
pub mod memory;
pub mod store;
pub mod user;
pub mod validation;

pub use config::{
    ConfigError, DashboardConfig, EditFormConfig, StoreBackend, StoreConfig, UpstreamConfig,
    UsherConfig, ValidationConfig,
};
pub use memory::MemoryUserStore;
pub use store::{StoreError, UserStore};
pub use user::{PendingUser, UserId, UserRecord};
pub use validation::{FieldError, UserValidator, ValidationErrors};
