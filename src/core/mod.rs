//! Core module containing the fundamental traits and types shared by the
//! server and the admin client

pub mod auth;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod listing;
pub mod query;
pub mod service;
pub mod slug;
pub mod validation;

pub use auth::{AuthContext, TokenPolicy};
pub use entity::{Entity, Orderable, Visibility};
pub use error::{WayfarerError, WayfarerResult};
pub use events::{ContentEvent, EventBus};
pub use field::{FieldFormat, FieldValue};
pub use listing::{Filters, ListView, Listable, Paginator, SortDirection, SortSpec};
pub use query::{PaginatedResponse, PaginationMeta, QueryParams};
pub use service::{DataService, DocumentService};
