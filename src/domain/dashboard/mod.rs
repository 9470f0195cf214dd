//! General dashboard summary
//!
//! The landing page widgets are derived, not fetched: occupancy and
//! averages come from the ambient overview, the alert feed from zone
//! conditions and critical inventory.

use std::fmt;

use crate::domain::environment::{EnvironmentOverview, ZoneClimate, ZoneCondition};
use crate::domain::product::{Product, StockStatus};
use crate::sync::SyncRecord;

/// Ambient status line when every zone sits inside its ranges.
pub const ALL_IN_RANGE: &str = "Todos los valores en rango.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Danger,
    Warning,
    Info,
}

/// One entry in the important-alerts widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardAlert {
    pub severity: AlertSeverity,
    pub text: String,
    pub detail: String,
}

impl DashboardAlert {
    fn new(severity: AlertSeverity, text: &str, detail: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.to_owned(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for DashboardAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "{} - {}", self.text, self.detail)
        }
    }
}

/// Everything the dashboard widgets show.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub occupancy: u64,
    pub average_temperature: f64,
    pub average_humidity: f64,
    pub environment_ok: bool,
    /// Product names needing a stock review, catalog order.
    pub low_stock: Vec<String>,
    pub alerts: Vec<DashboardAlert>,
}

/// Fold the already-synchronized resources into the dashboard widgets.
///
/// Zone alerts come first in zone order, then inventory alerts in
/// catalog order. Inactive products never raise alerts.
pub fn compose(
    overview: &EnvironmentOverview,
    zones: &[ZoneClimate],
    catalog: &[Product],
) -> DashboardSummary {
    let mut alerts = Vec::new();

    for zone in zones {
        match zone.condition() {
            ZoneCondition::HighTemperature => {
                alerts.push(DashboardAlert::new(
                    AlertSeverity::Danger,
                    "Temperatura alta",
                    zone.zone.clone(),
                ));
            }
            ZoneCondition::HighHumidity => {
                alerts.push(DashboardAlert::new(
                    AlertSeverity::Warning,
                    "Humedad elevada",
                    zone.zone.clone(),
                ));
            }
            ZoneCondition::Optimal => {}
        }
    }
    let environment_ok = alerts.is_empty();

    let mut low_stock = Vec::new();
    for product in catalog.iter().filter(|p| p.is_active()) {
        match product.stock_status() {
            StockStatus::OutOfStock => {
                alerts.push(DashboardAlert::new(
                    AlertSeverity::Danger,
                    "Agotado",
                    product.name.clone(),
                ));
                low_stock.push(product.name.clone());
            }
            StockStatus::LowStock => {
                alerts.push(DashboardAlert::new(
                    AlertSeverity::Warning,
                    "Stock bajo",
                    product.name.clone(),
                ));
                low_stock.push(product.name.clone());
            }
            StockStatus::InStock => {}
        }
    }

    DashboardSummary {
        occupancy: overview.occupancy.count,
        average_temperature: overview.temperature,
        average_humidity: overview.humidity,
        environment_ok,
        low_stock,
        alerts,
    }
}

// ── Tests ──────────────────────────────────────────────────────
