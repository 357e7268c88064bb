//! Service trait for record CRUD operations

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing records of one type
///
/// Implementations provide CRUD operations for a specific entity type.
/// Handlers are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Store a new record
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all records, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing record
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete a record, returning it if it existed
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;
}
