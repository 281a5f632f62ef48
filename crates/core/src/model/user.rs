use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("session token cannot be empty")]
    EmptyToken,
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// A platform account as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    /// First letter of the username, upper-cased, for avatars.
    #[must_use]
    pub fn initial(&self) -> String {
        initial_of(&self.username)
    }
}

/// Upper-cased first character of a display name, or `?` when empty.
#[must_use]
pub fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().collect())
}

/// Bearer token issued for a signed-in user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// # Errors
    ///
    /// Returns `UserError::EmptyToken` if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, UserError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(UserError::EmptyToken);
        }
        Ok(Self(token))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// The signed-in user together with the token used for backend calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user: User,
    pub token: AuthToken,
}

//
// ─── FORMS ─────────────────────────────────────────────────────────────────────
//

/// Validated login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns `UserError` if the email is missing/invalid or the password is empty.
    pub fn new(email: &str, password: &str) -> Result<Self, UserError> {
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Local part of the email, used as a display name when the backend
    /// does not return a user profile.
    #[must_use]
    pub fn email_local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated sign-up form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: String,
    password: String,
}

impl Registration {
    /// # Errors
    ///
    /// Returns `UserError` if any field is missing or the email is invalid.
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, UserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_string(),
            email,
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn validate_email(raw: &str) -> Result<String, UserError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(UserError::EmptyEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(UserError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_validate_email_shape() {
        assert_eq!(
            Credentials::new("", "pw").unwrap_err(),
            UserError::EmptyEmail
        );
        assert_eq!(
            Credentials::new("nobody", "pw").unwrap_err(),
            UserError::InvalidEmail
        );
        assert_eq!(
            Credentials::new("a@b.io", "").unwrap_err(),
            UserError::EmptyPassword
        );
        let creds = Credentials::new("  ada@example.com ", "pw").unwrap();
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.email_local_part(), "ada");
    }

    #[test]
    fn registration_requires_username() {
        let err = Registration::new("  ", "a@b.io", "pw").unwrap_err();
        assert_eq!(err, UserError::EmptyUsername);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-value").unwrap();
        assert!(!format!("{token:?}").contains("secret"));
        let creds = Credentials::new("a@b.io", "hunter2").unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn initial_handles_empty_names() {
        assert_eq!(initial_of("ada"), "A");
        assert_eq!(initial_of(""), "?");
    }
}
