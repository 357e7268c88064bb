//! Resources exposed through the generic CRUD routes

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::core::{DataService, Entity};

/// A record that can be created and partially updated over HTTP
///
/// `Create` and `Patch` are the request payloads; both are validated by the
/// [`ValidatedJson`](crate::core::validation::ValidatedJson) extractor
/// before these methods run.
pub trait Resource: Entity {
    /// POST body
    type Create: DeserializeOwned + Validate + Send + 'static;

    /// PATCH body; every field optional
    type Patch: DeserializeOwned + Validate + Send + 'static;

    /// Build a fresh record (new id, timestamps set to now)
    fn from_payload(payload: Self::Create) -> Self;

    /// Apply the fields present in `patch`
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Rules spanning several fields, checked on the whole record before it
    /// is stored
    ///
    /// A PATCH body only carries some fields, so these rules run again on
    /// the merged record.
    fn validate_record(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Other records this one points at; each must exist when stored
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

/// A pointer from one record to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Field name as it appears in the JSON body
    pub field: &'static str,

    /// Singular resource name of the target (e.g. "inventory_type")
    pub entity_type: &'static str,

    pub id: Uuid,
}

impl Reference {
    pub fn new(field: &'static str, entity_type: &'static str, id: Uuid) -> Self {
        Self {
            field,
            entity_type,
            id,
        }
    }
}

/// Trait for checking that a record exists without knowing its type
///
/// Used to validate [`Reference`]s across resources.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn exists(&self, id: &Uuid) -> Result<bool>;
}

/// [`EntityLookup`] over any [`DataService`]
pub struct ServiceLookup<T: Entity>(pub Arc<dyn DataService<T>>);

#[async_trait]
impl<T: Entity> EntityLookup for ServiceLookup<T> {
    async fn exists(&self, id: &Uuid) -> Result<bool> {
        Ok(self.0.get(id).await?.is_some())
    }
}
