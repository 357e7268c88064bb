//! HTTP server: route table, per-resource CRUD handlers and the builder
//! that assembles them

pub mod builder;
pub mod entity_registry;
pub mod resource;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use resource::{Lookups, ResourceDescriptor, ResourceState};
pub use router::build_router;
pub use state::AppStores;
