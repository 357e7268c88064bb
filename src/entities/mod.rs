//! Domain records: the inventory catalogue and the orders placed against it

pub mod inventory;
pub mod macros;
pub mod order;
pub mod payload;

pub use inventory::{InventoryItem, InventoryLanguage, InventoryTag, InventoryType};
pub use order::{Order, OrderTag};
pub use payload::{NamePatch, NewName, NewTag, TagPatch, default_active};
