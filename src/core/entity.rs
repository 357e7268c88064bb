//! Entity trait shared by every stored resource

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Base trait for all records kept by the API.
///
/// Every record has:
/// - id: Unique identifier
/// - created_at: Creation timestamp, immutable once stored
/// - updated_at: Last modification timestamp
///
/// Implementations are normally generated with [`impl_entity!`](crate::impl_entity).
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// The plural resource name (e.g., "inventory_items")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "inventory_item")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Mark the record as modified now
    fn touch(&mut self);
}

/// Oldest first, ties broken by id so that listings and pages are stable.
pub fn chronological<T: Entity>(a: &T, b: &T) -> std::cmp::Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.id().cmp(&b.id()))
}
