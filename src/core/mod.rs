//! Core module containing the traits and types shared by every resource

pub mod entity;
pub mod error;
pub mod query;
pub mod resource;
pub mod service;
pub mod store;
pub mod validation;

pub use entity::Entity;
pub use error::{ApiError, QueryError};
pub use query::{CreatedAfterParams, ListingPage, PagePolicy, list_created_after};
pub use resource::{EntityLookup, Reference, Resource, ServiceLookup};
pub use service::DataService;
pub use store::{CreatedAfterScan, ScanPage};
pub use validation::ValidatedJson;
