//! Ambient monitoring resource
//!
//! Merges the five sensor endpoints into per-zone climate records plus a
//! building-wide overview. Read-only: mutations are rejected client-side.

pub mod adapter;
pub mod model;

pub(crate) use adapter::fetch_occupancy;
pub use adapter::EnvironmentAdapter;
pub use model::{
    merge_zones, EnvironmentOverview, Occupancy, ZoneClimate, ZoneCondition, ZoneHumidity,
    ZoneTemperature, HIGH_HUMIDITY_PCT, HIGH_TEMPERATURE_C,
};

/// Engine specialization for the monitoring view.
pub type EnvironmentSynchronizer = crate::sync::Synchronizer<EnvironmentAdapter>;
