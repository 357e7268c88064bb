//! Generic CRUD handlers shared by every [`Resource`]
//!
//! Each resource gets the same five routes:
//! - `GET    /{path}`       list, oldest first
//! - `POST   /{path}`       create (201)
//! - `GET    /{path}/{id}`  fetch
//! - `PATCH  /{path}/{id}`  partial update
//! - `DELETE /{path}/{id}`  remove (204)

use anyhow::anyhow;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::entity_registry::EntityDescriptor;
use crate::core::{ApiError, DataService, EntityLookup, Resource, ValidatedJson};

/// Existence checks keyed by singular resource name
pub type Lookups = HashMap<&'static str, Arc<dyn EntityLookup>>;

/// Per-resource handler state
pub struct ResourceState<T: Resource> {
    pub service: Arc<dyn DataService<T>>,
    pub lookups: Arc<Lookups>,
}

impl<T: Resource> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            lookups: Arc::clone(&self.lookups),
        }
    }
}

impl<T: Resource> ResourceState<T> {
    pub fn new(service: Arc<dyn DataService<T>>, lookups: Arc<Lookups>) -> Self {
        Self { service, lookups }
    }

    /// Every reference held by `record` must point at a stored record
    async fn check_references(&self, record: &T) -> Result<(), ApiError> {
        for reference in record.references() {
            let lookup = self.lookups.get(reference.entity_type).ok_or_else(|| {
                anyhow!("no lookup registered for '{}'", reference.entity_type)
            })?;

            if !lookup.exists(&reference.id).await? {
                return Err(ApiError::InvalidReference {
                    field: reference.field,
                    id: reference.id,
                });
            }
        }
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<T, ApiError> {
        self.service
            .get(&id)
            .await?
            .ok_or(ApiError::NotFound {
                entity_type: T::resource_name_singular(),
                id,
            })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

pub async fn list_records<T: Resource>(
    State(state): State<ResourceState<T>>,
) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

pub async fn create_record<T: Resource>(
    State(state): State<ResourceState<T>>,
    ValidatedJson(payload): ValidatedJson<T::Create>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let record = T::from_payload(payload);
    record.validate_record()?;
    state.check_references(&record).await?;

    let created = state.service.create(record).await?;
    tracing::debug!(
        entity_type = T::resource_name_singular(),
        id = %created.id(),
        "record created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_record<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.fetch(id).await?))
}

pub async fn update_record<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<T::Patch>,
) -> Result<Json<T>, ApiError> {
    let id = parse_id(&id)?;
    let mut record = state.fetch(id).await?;

    record.apply_patch(patch);
    record.validate_record()?;
    state.check_references(&record).await?;
    record.touch();

    Ok(Json(state.service.update(&id, record).await?))
}

pub async fn delete_record<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .delete(&id)
        .await?
        .ok_or(ApiError::NotFound {
            entity_type: T::resource_name_singular(),
            id,
        })?;

    tracing::debug!(entity_type = T::resource_name_singular(), %id, "record deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// [`EntityDescriptor`] mounting the CRUD routes of one resource at `path`
pub struct ResourceDescriptor<T: Resource> {
    path: &'static str,
    state: ResourceState<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceDescriptor<T> {
    pub fn new(path: &'static str, state: ResourceState<T>) -> Self {
        Self {
            path,
            state,
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> EntityDescriptor for ResourceDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn path(&self) -> &str {
        self.path
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(self.path, get(list_records::<T>).post(create_record::<T>))
            .route(
                &format!("{}/{{id}}", self.path),
                get(get_record::<T>)
                    .patch(update_record::<T>)
                    .delete(delete_record::<T>),
            )
            .with_state(self.state.clone())
    }
}
