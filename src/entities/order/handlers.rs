//! HTTP handler for the order date-range listing

use axum::Json;
use axum::extract::{Query, State};
use std::sync::Arc;

use super::date_range::DateRangeParams;
use super::model::Order;
use crate::core::{ApiError, DataService};

/// `GET /orders/date-range?lookup_start_date=..&lookup_embargo_date=..`
pub async fn list_orders_in_date_range(
    State(orders): State<Arc<dyn DataService<Order>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let range = DateRangeParams::from_pairs(pairs).parse()?;

    let matching: Vec<Order> = orders
        .list()
        .await?
        .into_iter()
        .filter(|order| range.matches(order))
        .collect();

    tracing::debug!(?range, count = matching.len(), "order date-range lookup");

    Ok(Json(matching))
}
