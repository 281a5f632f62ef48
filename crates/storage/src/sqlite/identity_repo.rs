use chrono::{DateTime, Utc};
use quiz_core::model::{AuthToken, Identity, User, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use crate::repository::{IdentityRecord, IdentityRepository, StorageError};

const SLOT: i64 = 1;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn map_identity_row(row: &SqliteRow) -> Result<IdentityRecord, StorageError> {
    let user_id = row.try_get::<i64, _>("user_id").map_err(ser)?;
    let user_id = u64::try_from(user_id)
        .map_err(|_| StorageError::Serialization(format!("invalid user_id: {user_id}")))?;
    let username: String = row.try_get("username").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let token = AuthToken::new(row.try_get::<String, _>("token").map_err(ser)?).map_err(ser)?;
    let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;

    if username.trim().is_empty() {
        return Err(StorageError::Serialization("empty username".into()));
    }

    Ok(IdentityRecord {
        identity: Identity {
            user: User {
                id: UserId::new(user_id),
                username,
                email,
            },
            token,
        },
        saved_at,
    })
}

#[async_trait::async_trait]
impl IdentityRepository for SqliteRepository {
    async fn load_identity(&self) -> Result<Option<IdentityRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, username, email, token, saved_at
            FROM session_identity
            WHERE slot = ?1
            ",
        )
        .bind(SLOT)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_identity_row).transpose()
    }

    async fn save_identity(
        &self,
        identity: &Identity,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let user_id = i64::try_from(identity.user.id.value())
            .map_err(|_| StorageError::Serialization("user_id overflow".into()))?;

        sqlx::query(
            r"
            INSERT INTO session_identity (slot, user_id, username, email, token, saved_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(slot) DO UPDATE SET
                user_id = excluded.user_id,
                username = excluded.username,
                email = excluded.email,
                token = excluded.token,
                saved_at = excluded.saved_at
            ",
        )
        .bind(SLOT)
        .bind(user_id)
        .bind(&identity.user.username)
        .bind(&identity.user.email)
        .bind(identity.token.as_str())
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn clear_identity(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session_identity WHERE slot = ?1")
            .bind(SLOT)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
