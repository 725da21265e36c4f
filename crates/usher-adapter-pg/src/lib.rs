//! Postgres user store.
//!
//! Reads Django-shaped tables: a users table with `id`, `date_joined`,
//! `username`, `email`, `is_active`, and an email address table with
//! `user_id` and `verified`. A user counts as verified when any of its
//! addresses is.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use usher_core::config::{StoreConfig, UpstreamConfig};
use usher_core::{
    PendingUser, StoreError, UserId, UserRecord, UserStore, UserValidator, ValidationErrors,
};

/// A `UserStore` over a Postgres connection pool.
pub struct PgUserStore {
    pool: PgPool,
    queries: UserQueries,
    validator: UserValidator,
}

impl PgUserStore {
    /// Connect using the upstream settings.
    pub async fn connect(
        upstream: &UpstreamConfig,
        store: &StoreConfig,
        validator: UserValidator,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(upstream.pool.max_connections)
            .acquire_timeout(Duration::from_secs(upstream.pool.acquire_timeout_seconds))
            .connect(&upstream.connection_string())
            .await
            .map_err(db_error)?;
        tracing::info!(
            schema = %store.schema,
            users_table = %store.users_table,
            "Connected to user store"
        );
        Self::from_pool(pool, store, validator)
    }

    /// Wrap an existing pool.
    pub fn from_pool(
        pool: PgPool,
        store: &StoreConfig,
        validator: UserValidator,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            pool,
            queries: UserQueries::new(store)?,
            validator,
        })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_pending(&self) -> Result<Vec<PendingUser>, StoreError> {
        let rows = sqlx::query(&self.queries.list_pending)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter()
            .map(|row| record_from_row(row).map(|user| PendingUser::from(&user)))
            .collect()
    }

    async fn get(&self, id: UserId) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(&self.queries.get)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => record_from_row(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn validate(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut errors = ValidationErrors::new();
        if let Err(field_errors) = self.validator.check(user) {
            errors.extend(field_errors);
        }

        let taken: bool = sqlx::query_scalar(&self.queries.username_taken)
            .bind(&user.username)
            .bind(user.id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        if taken {
            errors.add("username", "A user with that username already exists.");
        }

        errors.into_result().map_err(StoreError::from)
    }

    async fn save(&self, user: &UserRecord) -> Result<(), StoreError> {
        let result = sqlx::query(&self.queries.update)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.active)
            .bind(user.id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user.id));
        }
        tracing::debug!(user_id = %user.id, active = user.active, "Saved user");
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(&self.queries.delete_emails)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let result = sqlx::query(&self.queries.delete_user)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error)?;
            return Err(StoreError::NotFound(id));
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }
}

/// SQL text for every store operation, built once from the table names.
#[derive(Debug, Clone)]
struct UserQueries {
    list_pending: String,
    get: String,
    username_taken: String,
    update: String,
    delete_emails: String,
    delete_user: String,
}

impl UserQueries {
    fn new(store: &StoreConfig) -> Result<Self, StoreError> {
        let schema = quote_ident(&store.schema)?;
        let users = format!("{}.{}", schema, quote_ident(&store.users_table)?);
        let emails = format!("{}.{}", schema, quote_ident(&store.email_table)?);

        // One row per user no matter how many addresses it has. The id is
        // widened since Django's default auto field is a 32-bit integer.
        let select = format!(
            "SELECT u.id::BIGINT AS id, u.date_joined, u.username, u.email, u.is_active, \
             COALESCE(BOOL_OR(e.verified), FALSE) AS email_verified \
             FROM {users} AS u LEFT JOIN {emails} AS e ON e.user_id = u.id"
        );
        let group_by = "GROUP BY u.id, u.date_joined, u.username, u.email, u.is_active";

        Ok(Self {
            list_pending: format!(
                "{select} WHERE u.is_active = FALSE {group_by} ORDER BY u.date_joined, u.id"
            ),
            get: format!("{select} WHERE u.id = $1 {group_by}"),
            username_taken: format!(
                "SELECT EXISTS (SELECT 1 FROM {users} WHERE username = $1 AND id <> $2)"
            ),
            update: format!(
                "UPDATE {users} SET username = $1, email = $2, is_active = $3 WHERE id = $4"
            ),
            delete_emails: format!("DELETE FROM {emails} WHERE user_id = $1"),
            delete_user: format!("DELETE FROM {users} WHERE id = $1"),
        })
    }
}

fn record_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: UserId(row.try_get::<i64, _>("id").map_err(db_error)?),
        date_joined: row.try_get("date_joined").map_err(db_error)?,
        username: row.try_get("username").map_err(db_error)?,
        email: row
            .try_get::<Option<String>, _>("email")
            .map_err(db_error)?
            .unwrap_or_default(),
        active: row.try_get("is_active").map_err(db_error)?,
        email_verified: row.try_get("email_verified").map_err(db_error)?,
    })
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

fn quote_ident(ident: &str) -> Result<String, StoreError> {
    if ident.is_empty() {
        return Err(StoreError::Internal("empty identifier".to_string()));
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::Internal(format!("invalid identifier '{}'", ident)));
    }
    Ok(format!("\"{}\"", ident))
}
