use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use super::{Cat, CatStore, StoreError};

/// Postgres-backed store. Domain fields live in a jsonb column so the
/// pipeline's open field set maps straight onto the table; `created_at`
/// gives the list endpoint a stable order.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(
        url: &str,
        max_connections: u32,
        connection_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connection_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Create the cats table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cats (
                id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                owner text NOT NULL,
                fields jsonb NOT NULL DEFAULT '{}'::jsonb,
                created_at timestamptz NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }
}

fn row_to_cat(row: &PgRow) -> Result<Cat, StoreError> {
    let id: Uuid = row.try_get("id").map_err(|e| StoreError::Query(e.to_string()))?;
    let owner: String = row
        .try_get("owner")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let fields: Value = row
        .try_get("fields")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let fields = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Ok(Cat { id, owner, fields })
}

/// Map sqlx failures onto the store error taxonomy: constraint violations
/// are client errors, pool and transport problems are availability issues,
/// everything else is an opaque query failure.
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::CheckViolation => {
                StoreError::Validation(db.message().to_string())
            }
            _ => StoreError::Query(err.to_string()),
        },
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}

#[async_trait]
impl CatStore for PostgresStore {
    async fn find_all(&self) -> Result<Vec<Cat>, StoreError> {
        let rows = sqlx::query("SELECT id, owner, fields FROM cats ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        rows.iter().map(row_to_cat).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cat>, StoreError> {
        let row = sqlx::query("SELECT id, owner, fields FROM cats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        row.as_ref().map(row_to_cat).transpose()
    }

    async fn create(&self, owner: &str, fields: Map<String, Value>) -> Result<Cat, StoreError> {
        let row = sqlx::query(
            "INSERT INTO cats (owner, fields) VALUES ($1, $2) RETURNING id, owner, fields",
        )
        .bind(owner)
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        row_to_cat(&row)
    }

    async fn apply_partial(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError> {
        // jsonb concatenation merges top-level keys, leaving the rest intact
        let result = sqlx::query("UPDATE cats SET fields = fields || $2 WHERE id = $1")
            .bind(id)
            .bind(Value::Object(fields))
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("cat {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }
}
