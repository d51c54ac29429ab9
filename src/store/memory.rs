use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Cat, CatStore, StoreError};

/// In-memory store used by tests and local runs. List order is insertion
/// order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cats: RwLock<Vec<Cat>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full copy of the current store contents. Tests use this to assert
    /// that rejected requests performed no writes.
    pub async fn snapshot(&self) -> Vec<Cat> {
        self.cats.read().await.clone()
    }
}

#[async_trait]
impl CatStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Cat>, StoreError> {
        Ok(self.cats.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cat>, StoreError> {
        Ok(self.cats.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, owner: &str, fields: Map<String, Value>) -> Result<Cat, StoreError> {
        let cat = Cat {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            fields,
        };
        self.cats.write().await.push(cat.clone());
        Ok(cat)
    }

    async fn apply_partial(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut cats = self.cats.write().await;
        let cat = cats
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("cat {} not found", id)))?;
        cat.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.cats.write().await.retain(|c| c.id != id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
