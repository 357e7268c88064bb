//! HTTP handler for the time-windowed inventory listing

use axum::extract::{Query, State};
use std::sync::Arc;

use super::model::InventoryItem;
use crate::core::query::{CreatedAfterParams, ListingPage, PagePolicy, list_created_after};
use crate::core::{ApiError, CreatedAfterScan};

/// State for `GET /inventory/created-after`
#[derive(Clone)]
pub struct InventoryListingState {
    pub store: Arc<dyn CreatedAfterScan<InventoryItem>>,
    pub policy: PagePolicy,
}

/// `GET /inventory/created-after?created_after=..&page=..&limit=..`
///
/// The query string is taken as raw pairs so a repeated key never fails
/// extraction; the last value wins.
pub async fn list_inventory_created_after(
    State(state): State<InventoryListingState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListingPage<InventoryItem>, ApiError> {
    let params = CreatedAfterParams::from_pairs(pairs);
    list_created_after(state.store.as_ref(), &params, &state.policy).await
}
