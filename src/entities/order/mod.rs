//! Orders and order tags

pub mod date_range;
pub mod handlers;
pub mod model;

pub use date_range::{DateRangeParams, OrderDateRange};
pub use handlers::list_orders_in_date_range;
pub use model::{NewOrder, Order, OrderPatch, OrderTag};
