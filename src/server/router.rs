//! Route table for the inventory API

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::resource::{Lookups, ResourceDescriptor, ResourceState};
use super::state::AppStores;
use crate::core::{DataService, PagePolicy, Resource};
use crate::entities::inventory::{InventoryListingState, list_inventory_created_after};
use crate::entities::order::list_orders_in_date_range;
use crate::entities::Order;
use crate::storage::InMemoryDataService;

/// Register the CRUD routes of every resource
///
/// Paths:
/// - /inventory/types, /inventory/languages, /inventory/tags, /inventory
/// - /orders/tags, /orders
pub fn resource_registry(stores: &AppStores) -> EntityRegistry {
    let lookups = Arc::new(stores.lookups());
    let mut registry = EntityRegistry::new();

    registry.register(describe("/inventory/types", &stores.inventory_types, &lookups));
    registry.register(describe(
        "/inventory/languages",
        &stores.inventory_languages,
        &lookups,
    ));
    registry.register(describe("/inventory/tags", &stores.inventory_tags, &lookups));
    registry.register(describe("/inventory", &stores.inventory_items, &lookups));
    registry.register(describe("/orders/tags", &stores.order_tags, &lookups));
    registry.register(describe("/orders", &stores.orders, &lookups));

    registry
}

fn describe<T: Resource>(
    path: &'static str,
    store: &InMemoryDataService<T>,
    lookups: &Arc<Lookups>,
) -> Box<dyn EntityDescriptor> {
    let service: Arc<dyn DataService<T>> = Arc::new(store.clone());
    Box::new(ResourceDescriptor::new(
        path,
        ResourceState::new(service, Arc::clone(lookups)),
    ))
}

/// Listing routes that sit next to the CRUD routes
pub fn query_routes(stores: &AppStores, policy: PagePolicy) -> Router {
    let listing = InventoryListingState {
        store: Arc::new(stores.inventory_items.clone()),
        policy,
    };
    let orders: Arc<dyn DataService<Order>> = Arc::new(stores.orders.clone());

    Router::new()
        .route(
            "/inventory/created-after",
            get(list_inventory_created_after).with_state(listing),
        )
        .route(
            "/orders/date-range",
            get(list_orders_in_date_range).with_state(orders),
        )
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "inventory-api"
    }))
}

/// Assemble the full application router
pub fn build_router(stores: &AppStores, policy: PagePolicy, custom_routes: Vec<Router>) -> Router {
    let registry = resource_registry(stores);
    for entity_type in registry.entity_types() {
        tracing::debug!(entity_type, path = registry.path_of(entity_type), "mounting resource");
    }

    let mut app = health_routes()
        .merge(registry.build_routes())
        .merge(query_routes(stores, policy));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
