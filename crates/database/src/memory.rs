use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use core_types::BaseEntity;
use tokio::sync::RwLock;

use crate::{DbError, Repository};

/// A `Repository` kept in process memory.
///
/// Ids start at 1 and are never reused, matching a `BIGSERIAL` column.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: BaseEntity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: BaseEntity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: BaseEntity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DbError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<T>, DbError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn create(&self, payload: T::Payload) -> Result<T, DbError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entity = T::from_parts(id, payload);
        self.rows.write().await.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: i64, payload: T::Payload) -> Result<Option<T>, DbError> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|row| {
            *row = T::from_parts(id, payload);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}
