//! Purchase order aggregate

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::product::Product;
use crate::support::{AppError, AppResult};
use crate::sync::SyncRecord;

/// IVA applied on top of the subtotal.
pub const IVA_PERCENT: u32 = 16;

/// Total due for a subtotal: IVA added, rounded half-up to cents.
pub fn order_total(subtotal: Decimal) -> Decimal {
    let factor = Decimal::new(100 + i64::from(IVA_PERCENT), 2);
    (subtotal * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    /// The backend spells paid orders "Payed"; keep its wire spelling.
    #[serde(rename = "Payed")]
    Paid,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Payed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One order line, keyed by product SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Purchase order as the backend stores it. Monetary fields are plain
/// JSON numbers on the wire; computation happens in [`Decimal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "IDUser", default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: OrderStatus,
    #[serde(rename = "Products", default)]
    pub lines: Vec<OrderLine>,
    #[serde(rename = "Subtotal", default)]
    pub subtotal: f64,
    #[serde(rename = "Total", default)]
    pub total: f64,
    #[serde(rename = "createDate", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updateDate", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Pending orders are the only ones that can still be paid or
    /// cancelled.
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Timestamp shown on the card: creation date, else last update.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.updated_at)
    }
}

impl SyncRecord for Order {
    fn record_id(&self) -> &str {
        &self.id
    }

    /// Cancelling an order keeps it listed; only the status flips.
    fn deactivate(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    fn is_active(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

/// A new order assembled from the product picker.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    pub total: f64,
}

impl NewOrder {
    /// Build an order from (product id, quantity) picks, resolving each
    /// line against the catalog. Zero-quantity picks are dropped; an
    /// unresolvable product or an empty result rejects the whole order.
    pub fn from_selection(selection: &[(String, u32)], catalog: &[Product]) -> AppResult<Self> {
        let mut lines = Vec::new();
        let mut subtotal = Decimal::ZERO;
        for (product_id, quantity) in selection {
            if *quantity == 0 {
                continue;
            }
            let product = catalog
                .iter()
                .find(|p| &p.id == product_id)
                .ok_or_else(|| {
                    AppError::validation(
                        "every line needs a resolvable product and a quantity above zero",
                    )
                })?;
            let price = Decimal::try_from(product.price).map_err(|_| {
                AppError::validation(format!("product {} has an unusable price", product.sku))
            })?;
            subtotal += price * Decimal::from(*quantity);
            lines.push(OrderLine {
                sku: product.sku.clone(),
                quantity: *quantity,
            });
        }
        if lines.is_empty() {
            return Err(AppError::validation(
                "select at least one product with a quantity above zero",
            ));
        }

        let total = order_total(subtotal);
        Ok(Self {
            lines,
            subtotal: subtotal
                .to_f64()
                .ok_or_else(|| AppError::validation("order subtotal out of range"))?,
            total: total
                .to_f64()
                .ok_or_else(|| AppError::validation("order total out of range"))?,
        })
    }

    pub(crate) fn wire_body(&self) -> Value {
        json!({
            "Status": OrderStatus::Pending,
            "Products": self.lines,
            "Subtotal": self.subtotal,
            "Total": self.total,
        })
    }
}

/// Mutation payloads for the order board: a full order on create, a
/// status transition on update.
#[derive(Debug, Clone)]
pub enum OrderDraft {
    New(NewOrder),
    Status(OrderStatus),
}

// ── Tests ──────────────────────────────────────────────────────
