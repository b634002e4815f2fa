//! SQLite storage backend for the retoken session-credential cache
//!
//! Persists one token row per account in a single `tokens` table, which
//! makes a plain file database a drop-in replacement for the cache's
//! durable store.

use async_trait::async_trait;
use retoken_core::{
    AccountId, Error,
    error::StorageError,
    repositories::TokenRepository,
    token::{BearerToken, TokenRecord},
};
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`TokenRepository`]
pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteTokenRow {
    account_id: String,
    token: String,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database by URL (e.g. `sqlite://tokens.db` or
    /// `sqlite::memory:`)
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| Error::Storage(StorageError::Connection(e.to_string())))?;

        Ok(Self::new(pool))
    }

    /// Create the `tokens` table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tokens (
                account_id TEXT PRIMARY KEY,
                token TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        tracing::debug!("Ensured tokens table exists");

        Ok(())
    }

    /// Check that the database answers queries
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(())
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn find_by_account(&self, account_id: &AccountId) -> Result<Option<TokenRecord>, Error> {
        let row = sqlx::query_as::<_, SqliteTokenRow>(
            "SELECT account_id, token FROM tokens WHERE account_id = ?1",
        )
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(row.map(|r| TokenRecord {
            account_id: AccountId::new(&r.account_id),
            token: BearerToken::new(&r.token),
        }))
    }

    async fn upsert(&self, account_id: &AccountId, token: &BearerToken) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO tokens (account_id, token, updated_at)
            VALUES (?1, ?2, unixepoch())
            ON CONFLICT(account_id) DO UPDATE SET
                token = excluded.token,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(account_id.as_str())
        .bind(token.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(())
    }

    async fn delete_all(&self, account_id: &AccountId) -> Result<(), Error> {
        // Deletes every matching row, not just the first, so a store with
        // duplicate rows from a past corruption still comes out clean
        sqlx::query("DELETE FROM tokens WHERE account_id = ?1")
            .bind(account_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(())
    }
}
