//! Entity registry for collecting resource descriptors and building their CRUD routes

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for a resource
///
/// Each resource (inventory types, orders, ...) is described by one of these
/// so the server can mount its CRUD routes without knowing its type.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "order_tag")
    fn entity_type(&self) -> &str;

    /// Collection path the routes are mounted at (e.g., "/orders/tags")
    fn path(&self) -> &str;

    /// Build the CRUD routes for this resource
    ///
    /// Should return a Router with routes like:
    /// - GET /{path}
    /// - POST /{path}
    /// - GET /{path}/{id}
    fn build_routes(&self) -> Router;
}

/// Registry for all resources served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register a descriptor
    ///
    /// The entity type name is used as the key; registering the same type
    /// twice replaces the first descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered routes merged together
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// All registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Mount path of a registered entity type
    pub fn path_of(&self, entity_type: &str) -> Option<&str> {
        self.descriptors.get(entity_type).map(|d| d.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal mock EntityDescriptor for testing
    struct MockDescriptor {
        entity_type: String,
        path: String,
    }

    impl MockDescriptor {
        fn new(entity_type: &str, path: &str) -> Self {
            Self {
                entity_type: entity_type.to_string(),
                path: path.to_string(),
            }
        }
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.entity_type
        }

        fn path(&self) -> &str {
            &self.path
        }

        fn build_routes(&self) -> Router {
            Router::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.entity_types().is_empty());
    }

    #[test]
    fn test_default_registry_is_empty() {
        let registry = EntityRegistry::default();
        assert!(registry.entity_types().is_empty());
    }

    #[test]
    fn test_register_multiple_entities_sorted() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("order", "/orders")));
        registry.register(Box::new(MockDescriptor::new("inventory_tag", "/inventory/tags")));
        registry.register(Box::new(MockDescriptor::new("order_tag", "/orders/tags")));

        assert_eq!(
            registry.entity_types(),
            vec!["inventory_tag", "order", "order_tag"]
        );
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("order", "/orders")));
        registry.register(Box::new(MockDescriptor::new("order", "/commandes")));

        assert_eq!(registry.entity_types().len(), 1);
        assert_eq!(registry.path_of("order"), Some("/commandes"));
    }

    #[test]
    fn test_path_of_unknown_type() {
        let registry = EntityRegistry::new();
        assert_eq!(registry.path_of("order"), None);
    }

    #[test]
    fn test_build_routes_with_entities() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("order", "/orders")));
        registry.register(Box::new(MockDescriptor::new("order_tag", "/orders/tags")));
        let _router = registry.build_routes();
    }
}
