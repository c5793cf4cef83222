//! Route descriptor for one content collection

use super::entity_registry::EntityDescriptor;
use super::handlers::{
    ResourceState, create_record, delete_record, get_any, get_public, list_all, list_public,
    reorder_records, update_record,
};
use crate::config::ListingConfig;
use crate::core::entity::{Entity, Orderable};
use crate::core::error::WayfarerResult;
use crate::core::events::EventBus;
use crate::core::service::{DataService, ListEnricher};
use async_trait::async_trait;
use axum::Router;
use axum::routing::{MethodRouter, get, put};
use std::sync::Arc;

/// Exposes a collection through the generic CRUD handlers
///
/// By default the collection is publicly readable and fully editable by
/// admins. The builder methods narrow or widen that:
///
/// ```rust,ignore
/// // Enquiries: posted by visitors, read and deleted by admins only
/// CrudDescriptor::new(enquiries, events.clone(), listing.clone())
///     .admin_only()
///     .public_create()
///     .immutable();
///
/// // Sliders: drag-and-drop ordering
/// CrudDescriptor::new(sliders, events, listing).with_reorder();
/// ```
pub struct CrudDescriptor<T: Entity> {
    state: ResourceState<T>,
    public_read: bool,
    public_create: bool,
    updatable: bool,
    reorder: Option<fn(ResourceState<T>) -> Router>,
}

impl<T: Entity> CrudDescriptor<T> {
    pub fn new(service: Arc<dyn DataService<T>>, events: EventBus, listing: ListingConfig) -> Self {
        Self {
            state: ResourceState {
                service,
                events,
                listing,
                enricher: None,
            },
            public_read: true,
            public_create: false,
            updatable: true,
            reorder: None,
        }
    }

    /// Hide the collection from public read endpoints
    pub fn admin_only(mut self) -> Self {
        self.public_read = false;
        self
    }

    /// Accept `POST /api/{plural}` without a token
    pub fn public_create(mut self) -> Self {
        self.public_create = true;
        self
    }

    /// Records cannot be replaced once created (no `PUT`)
    pub fn immutable(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Fill derived fields on listed records before search and sort
    pub fn with_enricher(mut self, enricher: Arc<dyn ListEnricher<T>>) -> Self {
        self.state.enricher = Some(enricher);
        self
    }

    pub fn boxed(self) -> Box<dyn EntityDescriptor> {
        Box::new(self)
    }
}

impl<T: Orderable> CrudDescriptor<T> {
    /// Add `PUT /api/admin/{plural}/reorder`
    pub fn with_reorder(mut self) -> Self {
        self.reorder = Some(reorder_routes::<T>);
        self
    }
}

fn reorder_routes<T: Orderable>(state: ResourceState<T>) -> Router {
    Router::new()
        .route(
            &format!("/api/admin/{}/reorder", T::resource_name()),
            put(reorder_records::<T>),
        )
        .with_state(state)
}

#[async_trait]
impl<T: Entity> EntityDescriptor for CrudDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn public_routes(&self) -> Router {
        let base = format!("/api/{}", T::resource_name());
        let mut router = Router::new();

        let mut collection: MethodRouter<ResourceState<T>> = MethodRouter::new();
        if self.public_read {
            collection = collection.get(list_public::<T>);
            router = router.route(&format!("{}/{{key}}", base), get(get_public::<T>));
        }
        if self.public_create {
            collection = collection.post(create_record::<T>);
        }
        if self.public_read || self.public_create {
            router = router.route(&base, collection);
        }

        router.with_state(self.state.clone())
    }

    fn admin_routes(&self) -> Router {
        let base = format!("/api/admin/{}", T::resource_name());

        let mut record = get(get_any::<T>).delete(delete_record::<T>);
        if self.updatable {
            record = record.put(update_record::<T>);
        }

        let router = Router::new()
            .route(&base, get(list_all::<T>).post(create_record::<T>))
            .route(&format!("{}/{{id}}", base), record)
            .with_state(self.state.clone());

        match self.reorder {
            Some(build) => router.merge(build(self.state.clone())),
            None => router,
        }
    }

    async fn record_count(&self) -> WayfarerResult<usize> {
        self.state.service.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enquiry, Slider};
    use crate::storage::InMemoryDataService;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_descriptor_names() {
        let descriptor = CrudDescriptor::<Enquiry>::new(
            Arc::new(InMemoryDataService::<Enquiry>::new()),
            EventBus::default(),
            ListingConfig::default(),
        )
        .admin_only()
        .public_create()
        .immutable();

        assert_eq!(descriptor.plural(), "enquiries");
        assert_eq!(descriptor.entity_type(), "enquiry");
        assert!(!descriptor.public_read);
        assert!(!descriptor.updatable);
    }

    #[tokio::test]
    async fn test_reorder_routes_build_and_count() {
        let descriptor = CrudDescriptor::<Slider>::new(
            Arc::new(InMemoryDataService::<Slider>::new()),
            EventBus::default(),
            ListingConfig::default(),
        )
        .with_reorder();

        let _admin = descriptor.admin_routes();
        let _public = descriptor.public_routes();
        assert_eq!(descriptor.record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_enquiries_accept_public_posts_only() {
        let descriptor = CrudDescriptor::<Enquiry>::new(
            Arc::new(InMemoryDataService::<Enquiry>::new()),
            EventBus::default(),
            ListingConfig::default(),
        )
        .admin_only()
        .public_create()
        .immutable();
        let app = descriptor.public_routes();

        let post = Request::builder()
            .method(Method::POST)
            .uri("/api/enquiries")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"Pema","email":"pema@example.com","message":"Hello"}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(post).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let list = Request::builder()
            .uri("/api/enquiries")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(list).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(descriptor.record_count().await.unwrap(), 1);
    }
}
