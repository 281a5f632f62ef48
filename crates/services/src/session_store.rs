use std::sync::{Arc, RwLock, RwLockWriteGuard};

use quiz_core::model::{AuthToken, Identity};
use storage::repository::{IdentityRepository, StorageError};
use tracing::{info, warn};

use crate::Clock;
use crate::error::SessionStoreError;
use crate::gateway::TokenProvider;

/// Holds the signed-in identity for the running process and mirrors it to
/// durable storage.
pub struct SessionStore {
    clock: Clock,
    repo: Arc<dyn IdentityRepository>,
    current: RwLock<Option<Identity>>,
}

impl SessionStore {
    /// Creates an empty store. Call [`SessionStore::init`] to restore a saved
    /// identity.
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn IdentityRepository>) -> Self {
        Self {
            clock,
            repo,
            current: RwLock::new(None),
        }
    }

    /// Restores the identity saved by an earlier run.
    ///
    /// A corrupt record is removed and the store starts signed out.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if storage cannot be read or cleaned up.
    pub async fn init(&self) -> Result<Option<Identity>, SessionStoreError> {
        let restored = match self.repo.load_identity().await {
            Ok(record) => record.map(|r| r.identity),
            Err(StorageError::Serialization(reason)) => {
                warn!("discarding unreadable saved identity: {reason}");
                self.repo.clear_identity().await?;
                None
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(identity) = &restored {
            info!("restored session for {}", identity.user.username);
        }
        *self.write()? = restored.clone();
        Ok(restored)
    }

    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.current().map(|identity| identity.token)
    }

    /// Signs `identity` in and persists it.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the identity cannot be saved.
    pub async fn set(&self, identity: Identity) -> Result<(), SessionStoreError> {
        self.repo
            .save_identity(&identity, self.clock.now())
            .await?;
        *self.write()? = Some(identity);
        Ok(())
    }

    /// Signs out and removes the persisted identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the stored identity cannot be removed.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.write()? = None;
        self.repo.clear_identity().await?;
        Ok(())
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Option<Identity>>, SessionStoreError> {
        self.current.write().map_err(|_| SessionStoreError::Poisoned)
    }
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<AuthToken> {
        self.token()
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{User, UserId};
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    use super::*;

    fn identity() -> Identity {
        Identity {
            user: User {
                id: UserId::new(3),
                username: "ada".into(),
                email: "ada@example.com".into(),
            },
            token: AuthToken::new("session-xyz").unwrap(),
        }
    }

    #[tokio::test]
    async fn set_then_restore_in_new_store() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        assert!(!store.is_authenticated());
        store.set(identity()).await.unwrap();
        assert_eq!(store.bearer_token().unwrap().as_str(), "session-xyz");

        let reloaded = SessionStore::new(fixed_clock(), repo);
        assert_eq!(reloaded.init().await.unwrap(), Some(identity()));
        assert!(reloaded.is_authenticated());
    }

    #[tokio::test]
    async fn clear_signs_out_everywhere() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SessionStore::new(fixed_clock(), repo.clone());
        store.set(identity()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.current().is_none());
        assert!(repo.load_identity().await.unwrap().is_none());
    }
}
