//! User record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary key of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UserId)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

/// A user account as held by the store.
///
/// `email_verified` is derived from the related email address records and is
/// never written back by `UserStore::save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub date_joined: DateTime<Utc>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub email_verified: bool,
}

impl UserRecord {
    /// Copy of this record with the active flag set, as it would be saved on approval.
    pub fn activated(&self) -> Self {
        Self {
            active: true,
            ..self.clone()
        }
    }

    /// Whether this record belongs in the pending list.
    pub fn is_pending(&self) -> bool {
        !self.active
    }
}

/// Row of the pending list: the raw user columns plus the derived
/// verification flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: UserId,
    pub date_joined: DateTime<Utc>,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
}

impl From<&UserRecord> for PendingUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            date_joined: user.date_joined,
            username: user.username.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
        }
    }
}
