use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

/// Shortest password the mock login accepts, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

// local@domain.tld with no whitespace and a single '@'.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be at least 6 characters")]
    WeakPassword,
}

/// Syntactically valid email address, kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns `CredentialsError::InvalidEmail` if the value is not `local@domain.tld`.
    pub fn parse(value: impl Into<String>) -> Result<Self, CredentialsError> {
        let value = value.into();
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(CredentialsError::InvalidEmail);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in user of the mock authentication flow.
///
/// No password is retained; it is only checked for length during `sign_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    email: Email,
    display_name: String,
    login_at: DateTime<Utc>,
}

impl UserIdentity {
    /// Validate credentials and build the identity.
    ///
    /// The email is checked before the password.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::InvalidEmail` or `CredentialsError::WeakPassword`.
    pub fn sign_in(
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, CredentialsError> {
        let email = Email::parse(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::WeakPassword);
        }
        let display_name = email.local_part().to_string();
        Ok(Self {
            email,
            display_name,
            login_at: now,
        })
    }

    /// Rehydrate an identity from storage.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::InvalidEmail` if the stored email no longer validates.
    pub fn from_persisted(
        email: String,
        display_name: String,
        login_at: DateTime<Utc>,
    ) -> Result<Self, CredentialsError> {
        Ok(Self {
            email: Email::parse(email)?,
            display_name,
            login_at,
        })
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn login_at(&self) -> DateTime<Utc> {
        self.login_at
    }
}
