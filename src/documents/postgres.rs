//! PostgreSQL implementation of the document backend.
//!
//! Documents live in a single `documents` table keyed by
//! `(collection, doc_id)` with a JSONB payload. A `seq` bigserial records
//! insertion order, which is the storage order exposed by `list`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::DocumentBackend;
use crate::error::CityscapeError;

/// PostgreSQL-backed document backend using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresDocuments {
    pool: PgPool,
}

impl PostgresDocuments {
    /// Creates a new backend with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `documents` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`CityscapeError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), CityscapeError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL,
                collection TEXT NOT NULL,
                doc_id TEXT NOT NULL,
                payload JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (collection, doc_id)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for PostgresDocuments {
    async fn insert(
        &self,
        collection: &str,
        payload: serde_json::Value,
    ) -> Result<String, CityscapeError> {
        let doc_id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO documents (collection, doc_id, payload) VALUES ($1, $2, $3)",
        )
        .bind(collection)
        .bind(&doc_id)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(doc_id)
    }

    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), CityscapeError> {
        sqlx::query(
            "INSERT INTO documents (collection, doc_id, payload) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, doc_id) \
             DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()",
        )
        .bind(collection)
        .bind(doc_id)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<serde_json::Value>, CityscapeError> {
        let row = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT payload FROM documents WHERE collection = $1 AND doc_id = $2",
        )
        .bind(collection)
        .bind(doc_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(row)
    }

    async fn delete(&self, collection: &str, doc_id: &str) -> Result<(), CityscapeError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND doc_id = $2")
            .bind(collection)
            .bind(doc_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(())
    }

    async fn list(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, serde_json::Value)>, CityscapeError> {
        let rows = sqlx::query_as::<_, (String, serde_json::Value)>(
            "SELECT doc_id, payload FROM documents WHERE collection = $1 ORDER BY seq ASC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CityscapeError::PersistenceError(e.to_string()))?;
        Ok(rows)
    }
}
