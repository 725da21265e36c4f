//! In-memory user store.
//!
//! Backs the `memory` store backend and the controller tests. Records live in
//! a `BTreeMap` guarded by an `RwLock`.

use crate::store::{StoreError, UserStore};
use crate::user::{PendingUser, UserId, UserRecord};
use crate::validation::{UserValidator, ValidationErrors};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A `UserStore` holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<UserId, UserRecord>>,
    validator: UserValidator,
}

impl MemoryUserStore {
    /// Create an empty store with the given validation rules.
    pub fn new(validator: UserValidator) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            validator,
        }
    }

    /// Create a store pre-filled with `users`.
    pub fn with_users(validator: UserValidator, users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: RwLock::new(users),
            validator,
        }
    }

    /// Insert or replace a record, including its derived fields.
    pub fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        self.write()?.insert(user.id, user);
        Ok(())
    }

    /// Number of records, active or not.
    pub fn len(&self) -> usize {
        self.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<UserId, UserRecord>>, StoreError> {
        self.users
            .read()
            .map_err(|_| StoreError::Internal("user store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<UserId, UserRecord>>, StoreError> {
        self.users
            .write()
            .map_err(|_| StoreError::Internal("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_pending(&self) -> Result<Vec<PendingUser>, StoreError> {
        let users = self.read()?;
        let mut pending: Vec<PendingUser> = users
            .values()
            .filter(|u| u.is_pending())
            .map(PendingUser::from)
            .collect();
        pending.sort_by(|a, b| a.date_joined.cmp(&b.date_joined).then(a.id.cmp(&b.id)));
        Ok(pending)
    }

    async fn get(&self, id: UserId) -> Result<UserRecord, StoreError> {
        self.read()?.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn validate(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut errors = ValidationErrors::new();
        if let Err(field_errors) = self.validator.check(user) {
            errors.extend(field_errors);
        }

        let taken = self
            .read()?
            .values()
            .any(|other| other.id != user.id && other.username == user.username);
        if taken {
            errors.add("username", "A user with that username already exists.");
        }

        errors.into_result().map_err(StoreError::from)
    }

    async fn save(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.write()?;
        let stored = users.get_mut(&user.id).ok_or(StoreError::NotFound(user.id))?;
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.active = user.active;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use chrono::{Duration, Utc};

    fn user(id: i64, username: &str, active: bool, minutes_ago: i64) -> UserRecord {
        UserRecord {
            id: UserId(id),
            date_joined: Utc::now() - Duration::minutes(minutes_ago),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            active,
            email_verified: false,
        }
    }

    fn store() -> MemoryUserStore {
        MemoryUserStore::with_users(
            UserValidator::default(),
            vec![
                user(1, "alice", false, 10),
                user(2, "bob", true, 30),
                user(3, "carol", false, 20),
            ],
        )
    }

    #[tokio::test]
    async fn test_list_pending_only_inactive_oldest_first() {
        let pending = store().list_pending().await.unwrap();
        let names: Vec<_> = pending.iter().map(|p| p.username.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[tokio::test]
    async fn test_list_pending_lists_each_user_once() {
        let store = store();
        let mut verified = user(1, "alice", false, 10);
        verified.email_verified = true;
        store.insert(verified).unwrap();
        store.insert(user(4, "dave", false, 5)).unwrap();

        let pending = store.list_pending().await.unwrap();
        let mut ids: Vec<_> = pending.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), pending.len());
        assert_eq!(ids, vec![UserId(1), UserId(3), UserId(4)]);
        assert!(pending.iter().find(|p| p.id == UserId(1)).unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let err = store().get(UserId(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(UserId(99))));
    }

    #[tokio::test]
    async fn test_validate_does_not_persist() {
        let store = store();
        let alice = store.get(UserId(1)).await.unwrap();
        store.validate(&alice.activated()).await.unwrap();
        assert!(!store.get(UserId(1)).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_validate_duplicate_username() {
        let store = store();
        let mut carol = store.get(UserId(3)).await.unwrap();
        carol.username = "bob".to_string();
        let err = store.validate(&carol).await.unwrap_err();
        let messages = err.validation_errors().unwrap().messages();
        assert_eq!(messages, vec!["A user with that username already exists.".to_string()]);
    }

    #[tokio::test]
    async fn test_validate_uses_configured_rules() {
        let store = MemoryUserStore::with_users(
            UserValidator::new(ValidationConfig {
                require_verified_email: true,
                ..Default::default()
            }),
            vec![user(1, "alice", false, 1)],
        );
        let alice = store.get(UserId(1)).await.unwrap();
        assert!(store.validate(&alice).await.is_ok());
        assert!(store.validate(&alice.activated()).await.is_err());
    }

    #[tokio::test]
    async fn test_save_keeps_derived_flag() {
        let store = store();
        let mut alice = store.get(UserId(1)).await.unwrap();
        alice.active = true;
        alice.email_verified = true;
        store.save(&alice).await.unwrap();

        let saved = store.get(UserId(1)).await.unwrap();
        assert!(saved.active);
        assert!(!saved.email_verified);
        assert_eq!(store.list_pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store();
        store.delete(UserId(3)).await.unwrap();
        assert_eq!(store.len(), 2);
        assert!(matches!(
            store.delete(UserId(3)).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
