//! Supplement order resource
//!
//! The order board joins three feeds: the orders themselves, the user
//! accounts that created them, and the product catalog behind each line.
//! Cancelled orders stay on the board with their status flipped.

pub mod adapter;
pub mod model;

pub use adapter::{OrderAdapter, OrderBoard, UNKNOWN_USER};
pub use model::{order_total, NewOrder, Order, OrderDraft, OrderLine, OrderStatus, IVA_PERCENT};

/// Engine specialization for the order board.
pub type OrderSynchronizer = crate::sync::Synchronizer<OrderAdapter>;
