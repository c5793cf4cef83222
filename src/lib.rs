//! # Wayfarer
//!
//! Content API and admin list toolkit for a tourism agency website.
//!
//! ## Features
//!
//! - **Typed collections**: tours, destinations, activities, testimonials,
//!   blog posts, sliders, team members, gallery images and enquiries
//! - **One listing pipeline**: search, equality filters, sorting and
//!   pagination shared by the server and the admin client
//! - **JSON-file storage**: one document per collection, written atomically
//! - **Token-guarded admin API**: public reads, admin writes, reordering and
//!   image uploads
//! - **Admin client**: list managers with optimistic, debounced toggles and
//!   reordering that roll back when the sync fails
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wayfarer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = WayfarerConfig::default().with_env_overrides();
//!     let data_dir = config.storage.data_dir.clone();
//!
//!     ServerBuilder::new(config)
//!         .with_site(StorageBackend::JsonFiles(data_dir))
//!         .await?
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

#[cfg(feature = "client")]
pub mod client;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, TokenPolicy},
        entity::{Entity, Orderable, Visibility},
        error::{WayfarerError, WayfarerResult},
        events::{ContentEvent, EventBus},
        field::{FieldFormat, FieldValue},
        listing::{Filters, ListView, Listable, Paginator, SortDirection, SortSpec, process},
        query::{PaginatedResponse, PaginationMeta, QueryParams},
        service::{DataService, DocumentService, ListEnricher},
        slug::slugify,
    };

    // === Macros ===
    pub use crate::{impl_entity, impl_orderable, impl_visibility};

    // === Content types ===
    pub use crate::entities::{
        Activity, BlogPost, ContactInfo, Destination, DestinationIndex, DestinationNames, Enquiry,
        GalleryImage, Slider, TeamMember, Testimonial, Tour,
    };

    // === Storage ===
    pub use crate::storage::{
        InMemoryDataService, InMemoryDocument, JsonFileDataService, JsonFileDocument,
    };

    // === Config ===
    pub use crate::config::WayfarerConfig;

    // === Server ===
    pub use crate::server::{
        CrudDescriptor, EntityDescriptor, EntityRegistry, ServerBuilder, StorageBackend,
    };

    // === Client ===
    #[cfg(feature = "client")]
    pub use crate::client::{ApiClient, ClientError, ContactInfoEditor, ResourceManager};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
