//! Axum extractor for validated request bodies
//!
//! `ValidatedJson<T>` deserializes the JSON body into `T` and runs its
//! `validator` rules before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::ApiError;

/// Axum extractor that deserializes and validates a JSON payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_tag(
///     ValidatedJson(payload): ValidatedJson<NewTag>,
/// ) -> Result<Json<InventoryTag>, ApiError> {
///     // payload passed every #[validate(...)] rule
/// }
/// ```
///
/// Malformed JSON is rejected with [`ApiError::InvalidBody`], rule
/// violations with [`ApiError::FieldErrors`]; both are 400s.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                details: rejection.body_text(),
            })?;

        payload.validate()?;

        Ok(Self(payload))
    }
}
