//! The user record store seam.

use crate::user::{PendingUser, UserId, UserRecord};
use crate::validation::ValidationErrors;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a `UserStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The record failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The backing database failed.
    #[error("database error: {0}")]
    Database(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// The validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            StoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(errors)
    }
}

/// Access to user records.
///
/// Implementations own the records; callers only hold copies.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All inactive users, each exactly once, oldest first.
    async fn list_pending(&self) -> Result<Vec<PendingUser>, StoreError>;

    /// Fetch one record.
    async fn get(&self, id: UserId) -> Result<UserRecord, StoreError>;

    /// Run the full validation for `user` without persisting anything.
    async fn validate(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Persist the writable fields of `user`.
    async fn save(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Delete a record and everything that depends on it.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}
