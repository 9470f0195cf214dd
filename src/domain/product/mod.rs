//! Inventory resource
//!
//! Product catalog with stock status derived from the unit count.
//! Soft-deleted products drop out of the active view.

pub mod adapter;
pub mod model;

pub use adapter::ProductAdapter;
pub use model::{Product, ProductDraft, StockStatus, PRODUCT_CATEGORIES};

/// Engine specialization for the inventory view.
pub type ProductSynchronizer = crate::sync::Synchronizer<ProductAdapter>;
