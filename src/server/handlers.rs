//! Generic HTTP handlers shared by every content collection
//!
//! Each handler is generic over the entity type and receives a
//! [`ResourceState`] holding the collection's service. Public handlers only
//! see records whose `is_public()` is true; admin handlers see everything.

use crate::config::ListingConfig;
use crate::core::entity::{Entity, Orderable};
use crate::core::error::{EntityError, RequestError, WayfarerError, WayfarerResult};
use crate::core::events::{ContentEvent, EventBus};
use crate::core::listing::{Paginator, process};
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::service::{DataService, ListEnricher, apply_order};
use crate::core::validation::Validated;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// State handed to the handlers of one collection
pub struct ResourceState<T> {
    pub service: Arc<dyn DataService<T>>,
    pub events: EventBus,
    pub listing: ListingConfig,
    pub enricher: Option<Arc<dyn ListEnricher<T>>>,
}

impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            events: self.events.clone(),
            listing: self.listing.clone(),
            enricher: self.enricher.clone(),
        }
    }
}

impl<T: Entity> ResourceState<T> {
    /// Stored records with derived fields filled in
    async fn enriched_list(&self) -> WayfarerResult<Vec<T>> {
        let mut items = self.service.list().await?;
        if let Some(enricher) = &self.enricher {
            enricher.enrich(&mut items).await?;
        }
        Ok(items)
    }
}

/// Body of a reorder request
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<u64>,
}

/// Run the listing pipeline and shape the response
///
/// Without `page` the whole processed array is returned; with `page` the
/// requested window is wrapped in a [`PaginatedResponse`].
pub fn list_response<T: Entity>(
    items: &[T],
    params: &QueryParams,
    listing: &ListingConfig,
) -> Response {
    let filters = params.to_filters();
    let sort = params.to_sort();
    let processed: Vec<T> = process(items, &filters, sort.as_ref())
        .into_iter()
        .cloned()
        .collect();

    if !params.is_paginated() {
        return Json(processed).into_response();
    }

    let mut paginator = Paginator::new(params.limit(listing.items_per_page, listing.max_limit));
    paginator.go_to(params.page());

    Json(PaginatedResponse {
        data: paginator.slice(&processed).to_vec(),
        pagination: paginator.meta(processed.len()),
    })
    .into_response()
}

fn not_found<T: Entity>(key: &str) -> WayfarerError {
    EntityError::NotFound {
        entity_type: T::resource_name_singular().to_string(),
        key: key.to_string(),
    }
    .into()
}

fn parse_id(raw: &str) -> Result<u64, RequestError> {
    raw.parse()
        .map_err(|_| RequestError::InvalidId { id: raw.to_string() })
}

/// `GET /api/{resource}`
pub async fn list_public<T: Entity>(
    State(state): State<ResourceState<T>>,
    Query(raw): Query<BTreeMap<String, String>>,
) -> WayfarerResult<Response> {
    let params = QueryParams::from_map(raw)?;
    let items: Vec<T> = state
        .enriched_list()
        .await?
        .into_iter()
        .filter(|item| item.is_public())
        .collect();

    Ok(list_response(&items, &params, &state.listing))
}

/// `GET /api/{resource}/{slugOrId}`
pub async fn get_public<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(key): Path<String>,
) -> WayfarerResult<Json<T>> {
    state
        .service
        .get(&key)
        .await?
        .filter(|item| item.is_public())
        .map(Json)
        .ok_or_else(|| not_found::<T>(&key))
}

/// `GET /api/admin/{resource}`
pub async fn list_all<T: Entity>(
    State(state): State<ResourceState<T>>,
    Query(raw): Query<BTreeMap<String, String>>,
) -> WayfarerResult<Response> {
    let params = QueryParams::from_map(raw)?;
    let items = state.enriched_list().await?;
    Ok(list_response(&items, &params, &state.listing))
}

/// `GET /api/admin/{resource}/{slugOrId}`
pub async fn get_any<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(key): Path<String>,
) -> WayfarerResult<Json<T>> {
    state
        .service
        .get(&key)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<T>(&key))
}

/// `POST /api/admin/{resource}` (and the public enquiry form)
pub async fn create_record<T: Entity>(
    State(state): State<ResourceState<T>>,
    Validated(entity): Validated<T>,
) -> WayfarerResult<(StatusCode, Json<T>)> {
    let created = state.service.create(entity).await?;

    tracing::info!(
        resource = T::resource_name(),
        id = created.id(),
        "record created"
    );
    state.events.publish(ContentEvent::Created {
        resource: T::resource_name().to_string(),
        id: created.id(),
        data: serde_json::to_value(&created)?,
    });

    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/admin/{resource}/{id}`: full replace, the path id wins
pub async fn update_record<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(raw_id): Path<String>,
    Validated(entity): Validated<T>,
) -> WayfarerResult<Json<T>> {
    let id = parse_id(&raw_id)?;
    let updated = state.service.update(id, entity).await?;

    tracing::info!(resource = T::resource_name(), id, "record updated");
    state.events.publish(ContentEvent::Updated {
        resource: T::resource_name().to_string(),
        id,
        data: serde_json::to_value(&updated)?,
    });

    Ok(Json(updated))
}

/// `DELETE /api/admin/{resource}/{id}`
pub async fn delete_record<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(raw_id): Path<String>,
) -> WayfarerResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    state.service.delete(id).await?;

    tracing::info!(resource = T::resource_name(), id, "record deleted");
    state.events.publish(ContentEvent::Deleted {
        resource: T::resource_name().to_string(),
        id,
    });

    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/admin/{resource}/reorder` with `{"ids": [...]}`
///
/// `sort_order` becomes each record's position in `ids`.
pub async fn reorder_records<T: Orderable>(
    State(state): State<ResourceState<T>>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> WayfarerResult<Json<Vec<T>>> {
    let Json(request) = body.map_err(|e| RequestError::InvalidBody {
        message: e.body_text(),
    })?;

    let current = state.service.list().await?;
    let stored = state
        .service
        .replace_all(apply_order(current, &request.ids))
        .await?;

    tracing::info!(
        resource = T::resource_name(),
        count = request.ids.len(),
        "records reordered"
    );
    state.events.publish(ContentEvent::Reordered {
        resource: T::resource_name().to_string(),
        ids: stored.iter().map(Entity::id).collect(),
    });

    Ok(Json(stored))
}
