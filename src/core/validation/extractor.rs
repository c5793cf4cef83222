//! Axum extractor for validated entities
//!
//! `Validated<T>` reads the JSON body, runs the entity's filters and
//! validators, then deserializes the result into `T`.

use crate::core::entity::Entity;
use crate::core::error::{EntityError, RequestError, ValidationError, WayfarerError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Axum extractor that validates, filters and decodes an entity payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_tour(
///     Validated(tour): Validated<Tour>,
/// ) -> WayfarerResult<Json<Tour>> {
///     // tour is already validated and filtered
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Get the inner entity
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Validate a raw payload and decode it as `T`
///
/// Shared by the extractor and the admin client, which runs the same
/// checks before sending a form.
pub fn validate_payload<T: Entity>(payload: Value) -> Result<T, WayfarerError> {
    let filtered = T::validation()
        .validate_and_filter(payload)
        .map_err(ValidationError::from)?;

    serde_json::from_value(filtered).map_err(|e| {
        EntityError::SerializationError {
            entity_type: T::resource_name_singular().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Entity,
{
    type Rejection = WayfarerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        validate_payload::<T>(payload).map(Validated)
    }
}
