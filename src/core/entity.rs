//! Entity traits defining the core abstraction for all content types

use crate::core::listing::Listable;
use crate::core::validation::EntityValidationConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every stored content type.
///
/// All entities have a numeric `id` assigned by the store and are held as
/// one JSON array per resource. Optional capabilities (slugs, visibility,
/// validation) have defaults that entities override where they apply.
pub trait Entity: Listable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The plural resource name used in URLs and data files (e.g., "tours")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "tour")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> u64;

    /// Set the identifier (used by the store on create and replace)
    fn set_id(&mut self, id: u64);

    /// URL slug, for entities addressable by slug
    fn slug(&self) -> Option<&str> {
        None
    }

    /// Fill derived fields before the record is stored (e.g. a missing slug)
    fn normalize(&mut self) {}

    /// Set server-assigned fields of a newly created record
    fn on_create(&mut self) {}

    /// Whether the record shows up on public endpoints
    fn is_public(&self) -> bool {
        true
    }

    /// Payload validation and filtering applied before deserialization
    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
    }

    /// Match a `slugOrId` path segment: numeric keys match the id,
    /// anything else matches the slug.
    fn matches_key(&self, key: &str) -> bool {
        match key.parse::<u64>() {
            Ok(id) => self.id() == id,
            Err(_) => self.slug() == Some(key),
        }
    }
}

/// Entities carrying a listed/active flag that can be toggled from a list view
pub trait Visibility: Entity {
    fn is_listed(&self) -> bool;

    fn set_listed(&mut self, listed: bool);
}

/// Entities whose display order is set by drag-and-drop reordering
pub trait Orderable: Entity {
    fn sort_order(&self) -> u32;

    fn set_sort_order(&mut self, order: u32);
}

/// Serde default for flags where absence means "shown"
pub fn default_true() -> bool {
    true
}
