//! Record validation applied before a user is saved.
//!
//! `UserValidator` holds the field-level rules. Rules that need to see other
//! records (username uniqueness) are checked by each `UserStore`
//! implementation on top of these.

use crate::config::ValidationConfig;
use crate::user::UserRecord;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
});

const MAX_EMAIL_LENGTH: usize = 254;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

/// All rule failures found for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Flat list of messages, in the order the rules failed.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Append another set of failures.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Field-level rules for user records.
#[derive(Debug, Clone, Default)]
pub struct UserValidator {
    config: ValidationConfig,
}

impl UserValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check every field rule and collect all failures.
    pub fn check(&self, user: &UserRecord) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = user.username.as_str();
        if username.is_empty() {
            errors.add("username", "Username: this field cannot be blank.");
        } else {
            let length = username.chars().count();
            if length > self.config.max_username_length {
                errors.add(
                    "username",
                    format!(
                        "Username: ensure this value has at most {} characters (it has {}).",
                        self.config.max_username_length, length
                    ),
                );
            }
            if !USERNAME_PATTERN.is_match(username) {
                errors.add(
                    "username",
                    "Username: enter a valid username. This value may contain only letters, \
                     numbers, and @/./+/-/_ characters.",
                );
            }
        }

        let email = user.email.as_str();
        if !email.is_empty() {
            if email.chars().count() > MAX_EMAIL_LENGTH {
                errors.add(
                    "email",
                    format!("Email address: ensure this value has at most {MAX_EMAIL_LENGTH} characters."),
                );
            }
            if !EMAIL_PATTERN.is_match(email) {
                errors.add("email", "Email address: enter a valid email address.");
            }
        }

        if self.config.require_verified_email && user.active && !user.email_verified {
            errors.add(
                "email",
                "Email address: the address must be verified before the account can be activated.",
            );
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserId;
    use chrono::Utc;

    fn user(username: &str, email: &str) -> UserRecord {
        UserRecord {
            id: UserId(7),
            date_joined: Utc::now(),
            username: username.to_string(),
            email: email.to_string(),
            active: true,
            email_verified: false,
        }
    }

    #[test]
    fn test_valid_user_passes() {
        let validator = UserValidator::default();
        assert!(validator.check(&user("alice", "alice@example.com")).is_ok());
        assert!(validator.check(&user("bob.smith+ops@corp", "")).is_ok());
    }

    #[test]
    fn test_blank_username_rejected() {
        let validator = UserValidator::default();
        let errors = validator.check(&user("", "a@example.com")).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field, "username");
        assert!(errors.messages()[0].contains("cannot be blank"));
    }

    #[test]
    fn test_username_with_space_rejected() {
        let validator = UserValidator::default();
        let errors = validator.check(&user("alice smith", "")).unwrap_err();
        assert!(errors.messages()[0].contains("valid username"));
    }

    #[test]
    fn test_username_too_long_rejected() {
        let validator = UserValidator::new(ValidationConfig {
            max_username_length: 5,
            ..Default::default()
        });
        let errors = validator.check(&user("abcdefgh", "")).unwrap_err();
        assert!(errors.messages()[0].contains("at most 5 characters (it has 8)"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let validator = UserValidator::default();
        for email in ["alice", "alice@", "alice@localhost", "a b@example.com"] {
            let errors = validator.check(&user("alice", email)).unwrap_err();
            assert_eq!(errors.errors()[0].field, "email", "email {email:?}");
        }
    }

    #[test]
    fn test_verified_email_required_only_when_active() {
        let validator = UserValidator::new(ValidationConfig {
            require_verified_email: true,
            ..Default::default()
        });

        let mut pending = user("alice", "alice@example.com");
        pending.active = false;
        assert!(validator.check(&pending).is_ok());

        let errors = validator.check(&pending.activated()).unwrap_err();
        assert!(errors.messages()[0].contains("must be verified"));

        pending.email_verified = true;
        assert!(validator.check(&pending.activated()).is_ok());
    }

    #[test]
    fn test_all_failures_collected() {
        let validator = UserValidator::default();
        let errors = validator.check(&user("bad name", "nope")).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.to_string(), errors.messages().join("; "));
    }
}
