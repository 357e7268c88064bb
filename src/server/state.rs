//! Stores behind the running API

use std::sync::Arc;

use super::resource::Lookups;
use crate::core::{DataService, Entity, EntityLookup, ServiceLookup};
use crate::entities::{
    InventoryItem, InventoryLanguage, InventoryTag, InventoryType, Order, OrderTag,
};
use crate::storage::InMemoryDataService;

/// One in-memory store per resource
///
/// Clones share the underlying records, so a test can keep a copy, seed it
/// directly and then serve requests against the same data.
#[derive(Clone, Default)]
pub struct AppStores {
    pub inventory_types: InMemoryDataService<InventoryType>,
    pub inventory_languages: InMemoryDataService<InventoryLanguage>,
    pub inventory_tags: InMemoryDataService<InventoryTag>,
    pub inventory_items: InMemoryDataService<InventoryItem>,
    pub order_tags: InMemoryDataService<OrderTag>,
    pub orders: InMemoryDataService<Order>,
}

impl AppStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existence checks for every resource that can be referenced
    pub fn lookups(&self) -> Lookups {
        let mut lookups = Lookups::new();
        register_lookup(&mut lookups, &self.inventory_types);
        register_lookup(&mut lookups, &self.inventory_languages);
        register_lookup(&mut lookups, &self.inventory_tags);
        register_lookup(&mut lookups, &self.inventory_items);
        register_lookup(&mut lookups, &self.order_tags);
        lookups
    }
}

fn register_lookup<T: Entity>(lookups: &mut Lookups, store: &InMemoryDataService<T>) {
    let service: Arc<dyn DataService<T>> = Arc::new(store.clone());
    let lookup: Arc<dyn EntityLookup> = Arc::new(ServiceLookup(service));
    lookups.insert(T::resource_name_singular(), lookup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_cover_referenced_resources() {
        let lookups = AppStores::new().lookups();
        let mut names: Vec<&str> = lookups.keys().copied().collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "inventory_item",
                "inventory_language",
                "inventory_tag",
                "inventory_type",
                "order_tag",
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_sees_records_added_later() {
        let stores = AppStores::new();
        let lookups = stores.lookups();

        let now = chrono::Utc::now();
        let tag = OrderTag {
            id: uuid::Uuid::new_v4(),
            name: "rush".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        stores.order_tags.create(tag.clone()).await.unwrap();

        assert!(lookups["order_tag"].exists(&tag.id).await.unwrap());
    }
}
