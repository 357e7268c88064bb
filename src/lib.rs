//! # Inventory API
//!
//! An HTTP service for an inventory catalogue and the orders placed against it.
//!
//! ## Features
//!
//! - **Time-Windowed Listing**: `GET /inventory/created-after` pages through
//!   items created after a cutoff, oldest first, with a capped page size
//! - **Resource CRUD**: types, languages, tags, items, order tags and orders,
//!   each with list/create/fetch/patch/delete routes
//! - **Reference Checks**: items and orders may only point at stored records
//! - **Order Date Windows**: `GET /orders/date-range` filters orders by start
//!   and embargo date
//! - **Configuration**: YAML file plus `INVENTORY_API_*` overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use inventory_api::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(AppConfig::load()?)
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        ApiError, CreatedAfterParams, CreatedAfterScan, DataService, Entity, EntityLookup,
        ListingPage, PagePolicy, QueryError, Reference, Resource, ScanPage, ServiceLookup,
        ValidatedJson, list_created_after,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{
        InventoryItem, InventoryLanguage, InventoryTag, InventoryType, Order, OrderTag,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{AppConfig, ListingConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppStores, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
