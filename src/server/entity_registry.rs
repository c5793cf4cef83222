//! Entity registry for managing collection descriptors and generating routes

use crate::core::error::WayfarerResult;
use async_trait::async_trait;
use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to expose one collection over HTTP
///
/// Routes are returned with their state already attached. Public routes
/// are mounted as-is; admin routes are mounted behind the bearer token
/// check.
#[async_trait]
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "tour")
    fn entity_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "tours")
    fn plural(&self) -> &str;

    /// Routes reachable without a token (e.g. `GET /api/tours`)
    fn public_routes(&self) -> Router;

    /// Routes under `/api/admin/{plural}`
    fn admin_routes(&self) -> Router;

    /// Number of stored records, reported by the health endpoint
    async fn record_count(&self) -> WayfarerResult<usize>;
}

/// Registry for all collections served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor
    ///
    /// The plural name is used as the key; registering it twice replaces
    /// the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let plural = descriptor.plural().to_string();
        if self.descriptors.insert(plural.clone(), descriptor).is_some() {
            tracing::warn!(resource = %plural, "descriptor replaced");
        }
    }

    /// Merge the public routes of every collection
    pub fn public_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, d| router.merge(d.public_routes()))
    }

    /// Merge the admin routes of every collection
    pub fn admin_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, d| router.merge(d.admin_routes()))
    }

    /// Registered resource names, sorted
    pub fn resources(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    /// Record count of every collection
    pub async fn counts(&self) -> WayfarerResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for (plural, descriptor) in &self.descriptors {
            counts.insert(plural.clone(), descriptor.record_count().await?);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal descriptor for registry tests
    struct MockDescriptor {
        plural: String,
        count: usize,
    }

    impl MockDescriptor {
        fn boxed(plural: &str, count: usize) -> Box<dyn EntityDescriptor> {
            Box::new(Self {
                plural: plural.to_string(),
                count,
            })
        }
    }

    #[async_trait]
    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.plural
        }

        fn plural(&self) -> &str {
            &self.plural
        }

        fn public_routes(&self) -> Router {
            Router::new()
        }

        fn admin_routes(&self) -> Router {
            Router::new()
        }

        async fn record_count(&self) -> WayfarerResult<usize> {
            Ok(self.count)
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().resources().is_empty());
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("tours", 1));
        registry.register(MockDescriptor::boxed("tours", 2));
        assert_eq!(registry.resources(), vec!["tours"]);
    }

    #[tokio::test]
    async fn test_counts_per_resource() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("tours", 3));
        registry.register(MockDescriptor::boxed("posts", 0));

        let counts = registry.counts().await.unwrap();
        assert_eq!(counts["tours"], 3);
        assert_eq!(counts["posts"], 0);
        assert_eq!(registry.resources(), vec!["posts", "tours"]);
    }

    #[test]
    fn test_build_routes_with_entities() {
        let mut registry = EntityRegistry::new();
        registry.register(MockDescriptor::boxed("tours", 0));
        let _public = registry.public_routes();
        let _admin = registry.admin_routes();
    }
}
