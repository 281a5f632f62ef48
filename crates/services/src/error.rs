//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::UserError;
use quiz_core::session::SessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the remote gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend request failed with status {0}")]
    Status(u16),
    #[error("unexpected backend response: {0}")]
    Decode(String),
    /// The backend refused an auth request and said why.
    #[error("{message}")]
    Rejected { message: String },
}

impl GatewayError {
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GatewayError::Unreachable(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() {
            GatewayError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::Status(status.as_u16())
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}

/// Errors emitted by the session store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error("session store lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] UserError),
    #[error("{0}")]
    Unreachable(String),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Gateway(GatewayError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl AuthError {
    /// True when the failure was a connection problem rather than a refusal.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, AuthError::Unreachable(_))
    }
}

/// Errors raised while reading client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
