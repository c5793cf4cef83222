//! HTTP server for the content collections
//!
//! The `ServerBuilder` mounts, for every registered collection:
//! - public read routes under `/api/{resource}`
//! - token-guarded admin routes under `/api/admin/{resource}`
//!
//! plus the health, contact details and upload endpoints.

pub mod builder;
pub mod descriptor;
pub mod endpoints;
pub mod entity_registry;
pub mod handlers;
pub mod site;

pub use builder::ServerBuilder;
pub use descriptor::CrudDescriptor;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use site::StorageBackend;
