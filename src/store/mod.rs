use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// A cat record. `id` is store-assigned and `owner` is set once at create
/// time from the authenticated principal; the remaining domain fields are
/// opaque key-value data the pipeline does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: Uuid,
    pub owner: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Errors surfaced by a record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

/// Persistence collaborator for cat records. Absence on lookup is a normal
/// `None`, never an error; the existence guard decides what absence means.
#[async_trait]
pub trait CatStore: Send + Sync {
    /// All records in store-defined order.
    async fn find_all(&self) -> Result<Vec<Cat>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cat>, StoreError>;

    /// Persist a new record. The owner comes from the authenticated
    /// principal, never from the field payload.
    async fn create(&self, owner: &str, fields: Map<String, Value>) -> Result<Cat, StoreError>;

    /// Merge the given fields onto an existing record, leaving all other
    /// fields in place.
    async fn apply_partial(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Liveness probe for the /health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
