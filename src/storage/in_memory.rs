//! In-memory implementation of DataService and CreatedAfterScan

use crate::core::entity::chronological;
use crate::core::store::{CreatedAfterScan, ScanPage};
use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same underlying map.
pub struct InMemoryDataService<T: Entity> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new, empty in-memory service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: Entity> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.contains_key(&entity.id()) {
            return Err(anyhow!(
                "{} with id '{}' already exists",
                T::resource_name_singular(),
                entity.id()
            ));
        }

        records.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<T> = records.values().cloned().collect();
        all.sort_by(chronological);

        Ok(all)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = records
            .get_mut(id)
            .ok_or_else(|| anyhow!("{} with id '{}' not found", T::resource_name_singular(), id))?;

        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records.remove(id))
    }
}

#[async_trait]
impl<T: Entity> CreatedAfterScan<T> for InMemoryDataService<T> {
    async fn scan_created_after(
        &self,
        cutoff: DateTime<Utc>,
        offset: usize,
        limit: usize,
    ) -> Result<ScanPage<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matching: Vec<&T> = records
            .values()
            .filter(|record| record.created_at() > cutoff)
            .collect();
        matching.sort_by(|a, b| chronological(*a, *b));

        Ok(ScanPage {
            total: matching.len(),
            items: matching
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        })
    }
}
