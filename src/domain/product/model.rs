//! Inventory product entity

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::sync::SyncRecord;

/// Categories offered by the product form.
pub const PRODUCT_CATEGORIES: [&str; 5] = [
    "Proteínas",
    "Creatinas",
    "Pre-Entrenos",
    "Ropa",
    "Accesorios",
];

/// Stock level derived from the unit count, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Units below this count flag a product as running low.
    pub const LOW_STOCK_THRESHOLD: u32 = 10;

    pub fn from_stock(stock: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock < Self::LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Stable identifier used by filters and style hooks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
        }
    }

    /// Label shown on the inventory table pill.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "En Stock",
            Self::LowStock => "Stock Bajo",
            Self::OutOfStock => "Agotado",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory product. The wire spells the category field in Spanish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: String,
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

impl SyncRecord for Product {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Inventory form submission.
#[derive(Debug, Clone, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "sku is required"))]
    pub sku: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    pub stock: u32,
}

impl ProductDraft {
    pub(crate) fn wire_body(&self) -> Value {
        json!({
            "sku": self.sku.trim(),
            "name": self.name.trim(),
            "categoria": self.category.trim(),
            "description": self.description,
            "price": self.price,
            "stock": self.stock,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
