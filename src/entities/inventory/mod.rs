//! Inventory catalogue

pub mod handlers;
pub mod model;

pub use handlers::{InventoryListingState, list_inventory_created_after};
pub use model::{
    InventoryItem, InventoryItemPatch, InventoryLanguage, InventoryTag, InventoryType,
    NewInventoryItem,
};
