//! Entity registry: collects one descriptor per domain and mounts its routes

use axum::Router;
use indexmap::IndexMap;

/// Describes how to build the routes of one domain
///
/// Routes are relative: `build_routes` returns `/` and `/{id}` and the
/// registry nests them under `/{path}`.
pub trait EntityDescriptor: Send + Sync {
    /// The record type name (singular, e.g. "card_statement")
    fn entity_type(&self) -> &str;

    /// The URL segment the routes are mounted under (e.g. "card-statements")
    fn path(&self) -> &str;

    /// Build the routes of this domain, with state already applied
    fn build_routes(&self) -> Router;
}

/// Registry for every domain of the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second descriptor for the same entity type
    /// replaces the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(entity = %entity_type, path = descriptor.path(), "registered entity routes");
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Nest every domain router under `/{path}`
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.nest(&format!("/{}", descriptor.path()), descriptor.build_routes())
            })
    }

    /// Registered entity types, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum_test::TestServer;

    struct StaticDescriptor {
        entity_type: &'static str,
        path: &'static str,
    }

    impl EntityDescriptor for StaticDescriptor {
        fn entity_type(&self) -> &str {
            self.entity_type
        }

        fn path(&self) -> &str {
            self.path
        }

        fn build_routes(&self) -> Router {
            let body = self.entity_type;
            Router::new()
                .route("/", get(move || async move { body }))
                .route("/{id}", get(|| async { "one" }))
        }
    }

    fn descriptor(entity_type: &'static str, path: &'static str) -> Box<dyn EntityDescriptor> {
        Box::new(StaticDescriptor { entity_type, path })
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
    }

    #[test]
    fn test_registration_order_and_replacement() {
        let mut registry = EntityRegistry::new();
        registry.register(descriptor("card", "cards"));
        registry.register(descriptor("tag", "tags"));
        registry.register(descriptor("card", "credit-cards"));
        assert_eq!(registry.entity_types(), vec!["card", "tag"]);
    }

    #[tokio::test]
    async fn test_routes_are_nested_under_path() {
        let mut registry = EntityRegistry::new();
        registry.register(descriptor("card_statement", "card-statements"));
        registry.register(descriptor("tag", "tags"));

        let server = TestServer::new(registry.build_routes());
        server.get("/card-statements").await.assert_text("card_statement");
        server.get("/tags/123").await.assert_text("one");
        server.get("/card_statement").await.assert_status_not_found();
    }
}
