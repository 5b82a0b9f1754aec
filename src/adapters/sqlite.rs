use async_trait::async_trait;
use sqlx::{
    Row,
    sqlite::{SqlitePool, SqlitePoolOptions},
};

use crate::{ContractError, StateStore};

/// SQLite-backed world state, one row per key.
///
/// Schema:
/// ```sql
/// CREATE TABLE world_state (
///     key TEXT PRIMARY KEY,
///     value BLOB NOT NULL
/// );
/// ```
pub struct SqliteStateStore {
    pub(crate) pool: SqlitePool,
}

impl SqliteStateStore {
    /// Create a new store backed by a database file
    pub async fn new_file(path: &str) -> Result<Self, ContractError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{}?mode=rwc", path))
            .await
            .map_err(|e| ContractError::Storage(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Create a new store with an in-memory database
    pub async fn new_memory() -> Result<Self, ContractError> {
        // A single connection, otherwise every pooled connection would see
        // its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| ContractError::Storage(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), ContractError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS world_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ContractError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        let row = sqlx::query("SELECT value FROM world_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ContractError::Storage(e.to_string()))?;

        row.map(|r| r.try_get::<Vec<u8>, _>("value"))
            .transpose()
            .map_err(|e| ContractError::Storage(e.to_string()))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        sqlx::query(
            r#"
            INSERT INTO world_state (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| ContractError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), ContractError> {
        sqlx::query("DELETE FROM world_state WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| ContractError::Storage(e.to_string()))?;

        Ok(())
    }
}
