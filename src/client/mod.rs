//! Admin-side client
//!
//! [`ApiClient`] wraps the REST API. [`ResourceManager`] keeps one fetched
//! collection with its search, filter, sort and page state, and syncs
//! optimistic edits through a [`Debouncer`].

pub mod api;
pub mod contact;
pub mod debounce;
pub mod error;
pub mod manager;

pub use api::{ApiClient, UploadOutcome};
pub use contact::ContactInfoEditor;
pub use debounce::Debouncer;
pub use error::ClientError;
pub use manager::ResourceManager;
