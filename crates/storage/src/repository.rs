use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::Identity;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The signed-in identity as it was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub identity: Identity,
    pub saved_at: DateTime<Utc>,
}

/// Durable slot for the identity that survives restarts.
///
/// Holds at most one identity; saving replaces the previous one.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Read the stored identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored record is corrupt,
    /// or other storage errors.
    async fn load_identity(&self) -> Result<Option<IdentityRecord>, StorageError>;

    /// Persist `identity`, replacing any stored one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the identity cannot be stored.
    async fn save_identity(
        &self,
        identity: &Identity,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Remove the stored identity. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn clear_identity(&self) -> Result<(), StorageError>;
}

/// Simple in-memory implementation for prototyping and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    identity: Arc<Mutex<Option<IdentityRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryRepository {
    async fn load_identity(&self) -> Result<Option<IdentityRecord>, StorageError> {
        let guard = self
            .identity
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_identity(
        &self,
        identity: &Identity,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .identity
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(IdentityRecord {
            identity: identity.clone(),
            saved_at,
        });
        Ok(())
    }

    async fn clear_identity(&self) -> Result<(), StorageError> {
        let mut guard = self
            .identity
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub identity: Arc<dyn IdentityRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let identity: Arc<dyn IdentityRepository> = Arc::new(InMemoryRepository::new());
        Self { identity }
    }
}
