//! HTTP server: route registry, router assembly and the builder that wires
//! configuration, storage and domains together

pub mod builder;
pub mod entity_registry;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
