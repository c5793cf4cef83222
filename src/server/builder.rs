//! ServerBuilder for fluent API to build the HTTP server

use super::descriptor::CrudDescriptor;
use super::endpoints::{
    ContactState, UploadState, get_contact_info, health, put_contact_info, upload,
};
use super::entity_registry::{EntityDescriptor, EntityRegistry};
use crate::config::WayfarerConfig;
use crate::core::auth::{TokenPolicy, require_admin};
use crate::core::entity::Entity;
use crate::core::events::EventBus;
use crate::core::service::{DataService, DocumentService};
use crate::entities::ContactInfo;
use crate::storage::InMemoryDocument;
use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted upload body
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Builder for the content server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(config)
///     .with_site(StorageBackend::JsonFiles("data".into()))
///     .await?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: WayfarerConfig,
    registry: EntityRegistry,
    contact: Option<Arc<dyn DocumentService<ContactInfo>>>,
    event_bus: EventBus,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: WayfarerConfig) -> Self {
        Self {
            config,
            registry: EntityRegistry::new(),
            contact: None,
            event_bus: EventBus::default(),
            custom_routes: Vec::new(),
        }
    }

    pub fn config(&self) -> &WayfarerConfig {
        &self.config
    }

    /// Use a shared event bus (e.g. one the caller already subscribed to)
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = event_bus;
        self
    }

    /// The bus admin mutations are published on
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Register a hand-written descriptor
    pub fn register(mut self, descriptor: Box<dyn EntityDescriptor>) -> Self {
        self.registry.register(descriptor);
        self
    }

    /// Register a collection served by the generic CRUD handlers
    ///
    /// `configure` adjusts the default exposure (public read, admin CRUD).
    pub fn collection<T: Entity>(
        self,
        service: Arc<dyn DataService<T>>,
        configure: impl FnOnce(CrudDescriptor<T>) -> CrudDescriptor<T>,
    ) -> Self {
        let descriptor = CrudDescriptor::new(
            service,
            self.event_bus.clone(),
            self.config.listing.clone(),
        );
        self.register(configure(descriptor).boxed())
    }

    /// Set the contact details document
    pub fn with_contact_info(mut self, service: impl DocumentService<ContactInfo> + 'static) -> Self {
        self.contact = Some(Arc::new(service));
        self
    }

    /// Add routes that don't fit the collection pattern
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// Public routes, token-guarded admin routes, the uploads directory,
    /// CORS and request tracing.
    pub fn build(self) -> Result<Router> {
        let registry = Arc::new(self.registry);
        let policy = TokenPolicy::with_tokens(self.config.auth.admin_tokens.clone());
        if !policy.is_restricted() {
            tracing::warn!("no admin tokens configured, any bearer token is accepted");
        }

        let contact_service: Arc<dyn DocumentService<ContactInfo>> = match self.contact {
            Some(service) => service,
            None => Arc::new(InMemoryDocument::new(
                ContactInfo::DOCUMENT_NAME,
                ContactInfo::default(),
            )),
        };
        let contact = ContactState {
            service: contact_service,
        };
        let uploads = UploadState {
            dir: Arc::new(self.config.storage.upload_dir.clone()),
        };

        let admin = registry
            .admin_routes()
            .merge(
                Router::new()
                    .route("/api/admin/contact-info", put(put_contact_info))
                    .with_state(contact.clone()),
            )
            .merge(
                Router::new()
                    .route("/api/admin/upload", post(upload))
                    .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
                    .with_state(uploads),
            )
            .route_layer(middleware::from_fn_with_state(policy, require_admin));

        let mut app = Router::new()
            .route("/api/health", get(health))
            .with_state(registry.clone())
            .merge(registry.public_routes())
            .merge(
                Router::new()
                    .route("/api/contact-info", get(get_contact_info))
                    .with_state(contact),
            )
            .merge(admin);

        for custom in self.custom_routes {
            app = app.merge(custom);
        }

        tracing::debug!(resources = ?registry.resources(), "routes built");

        Ok(app
            .nest_service("/uploads", ServeDir::new(&self.config.storage.upload_dir))
            .layer(cors_layer(&self.config.server.cors_origins))
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` and handles SIGTERM and Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let app = self.build()?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// CORS for the configured origins; none or `*` allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .inspect_err(|_| tracing::warn!(%origin, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
