//! Ambient sensor readings per gym zone.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::sync::SyncRecord;

/// Temperature at or above this many °C flags a zone hot.
pub const HIGH_TEMPERATURE_C: f64 = 28.0;
/// Relative humidity at or above this percentage flags a zone humid.
pub const HIGH_HUMIDITY_PCT: f64 = 70.0;

/// Today's door-counter total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Occupancy {
    #[serde(default, alias = "total", alias = "people")]
    pub count: u64,
}

impl Occupancy {
    /// The counter endpoint has answered both as a bare number and as an
    /// object; read either.
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Number(n) => Self {
                count: n.as_u64().unwrap_or(0),
            },
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Wire row from the by-zone temperature endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneTemperature {
    #[serde(alias = "zoneName", alias = "name")]
    pub zone: String,
    #[serde(alias = "value", alias = "avgTemperature")]
    pub temperature: f64,
}

/// Wire row from the by-zone humidity endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneHumidity {
    #[serde(alias = "zoneName", alias = "name")]
    pub zone: String,
    #[serde(alias = "value", alias = "avgHumidity")]
    pub humidity: f64,
}

/// Merged climate for one zone. A zone missing from one of the two feeds
/// keeps `None` for that reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneClimate {
    pub zone: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl ZoneClimate {
    pub fn condition(&self) -> ZoneCondition {
        if self.temperature.is_some_and(|t| t >= HIGH_TEMPERATURE_C) {
            return ZoneCondition::HighTemperature;
        }
        if self.humidity.is_some_and(|h| h >= HIGH_HUMIDITY_PCT) {
            return ZoneCondition::HighHumidity;
        }
        ZoneCondition::Optimal
    }
}

impl SyncRecord for ZoneClimate {
    fn record_id(&self) -> &str {
        &self.zone
    }
}

/// Zone status shown on the monitoring cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneCondition {
    Optimal,
    HighTemperature,
    HighHumidity,
}

impl ZoneCondition {
    /// Card label, as the monitoring view prints it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimal => "Óptimo",
            Self::HighTemperature => "Temperatura Alta",
            Self::HighHumidity => "Humedad Elevada",
        }
    }

    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::Optimal)
    }
}

impl fmt::Display for ZoneCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Building-wide aggregates shown above the zone grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentOverview {
    pub occupancy: Occupancy,
    pub temperature: f64,
    pub humidity: f64,
}

/// Merge the two by-zone feeds by zone name, keeping first-seen order.
pub fn merge_zones(
    temperatures: Vec<ZoneTemperature>,
    humidity: Vec<ZoneHumidity>,
) -> Vec<ZoneClimate> {
    let mut zones: Vec<ZoneClimate> = Vec::new();
    for row in temperatures {
        match zones.iter_mut().find(|z| z.zone == row.zone) {
            Some(zone) => zone.temperature = Some(row.temperature),
            None => zones.push(ZoneClimate {
                zone: row.zone,
                temperature: Some(row.temperature),
                humidity: None,
            }),
        }
    }
    for row in humidity {
        match zones.iter_mut().find(|z| z.zone == row.zone) {
            Some(zone) => zone.humidity = Some(row.humidity),
            None => zones.push(ZoneClimate {
                zone: row.zone,
                temperature: None,
                humidity: Some(row.humidity),
            }),
        }
    }
    zones
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn zone(name: &str, temperature: Option<f64>, humidity: Option<f64>) -> ZoneClimate {
        ZoneClimate {
            zone: name.to_owned(),
            temperature,
            humidity,
        }
    }

    #[test]
    fn condition_thresholds_match_the_monitoring_cards() {
        assert_eq!(
            zone("Zona de ejercicios Cardio", Some(22.0), Some(50.0)).condition(),
            ZoneCondition::Optimal
        );
        assert_eq!(
            zone("Área de Pesas Libres", Some(28.0), Some(58.0)).condition(),
            ZoneCondition::HighTemperature
        );
        assert_eq!(
            zone("Salón de Clases Grupales", Some(24.0), Some(75.0)).condition(),
            ZoneCondition::HighHumidity
        );
    }

    #[test]
    fn just_below_the_thresholds_is_optimal() {
        assert_eq!(
            zone("Spinning", Some(27.9), Some(69.9)).condition(),
            ZoneCondition::Optimal
        );
    }

    #[test]
    fn heat_wins_when_both_readings_are_out_of_range() {
        assert_eq!(
            zone("Sauna", Some(31.0), Some(90.0)).condition(),
            ZoneCondition::HighTemperature
        );
    }

    #[test]
    fn labels_are_the_spanish_card_strings() {
        assert_eq!(ZoneCondition::Optimal.to_string(), "Óptimo");
        assert_eq!(ZoneCondition::HighTemperature.to_string(), "Temperatura Alta");
        assert_eq!(ZoneCondition::HighHumidity.to_string(), "Humedad Elevada");
        assert!(!ZoneCondition::Optimal.is_alert());
        assert!(ZoneCondition::HighHumidity.is_alert());
    }

    #[test]
    fn merge_keeps_first_seen_order_and_pairs_by_name() {
        let temperatures = vec![
            ZoneTemperature {
                zone: "Cardio".into(),
                temperature: 22.0,
            },
            ZoneTemperature {
                zone: "Pesas".into(),
                temperature: 28.5,
            },
        ];
        let humidity = vec![
            ZoneHumidity {
                zone: "Pesas".into(),
                humidity: 58.0,
            },
            ZoneHumidity {
                zone: "Clases".into(),
                humidity: 75.0,
            },
        ];

        let zones = merge_zones(temperatures, humidity);
        assert_eq!(
            zones,
            vec![
                zone("Cardio", Some(22.0), None),
                zone("Pesas", Some(28.5), Some(58.0)),
                zone("Clases", None, Some(75.0)),
            ]
        );
    }

    #[test]
    fn occupancy_reads_bare_numbers_and_objects() {
        assert_eq!(Occupancy::from_value(json!(127)).count, 127);
        assert_eq!(Occupancy::from_value(json!({ "count": 42 })).count, 42);
        assert_eq!(Occupancy::from_value(json!({ "total": 9 })).count, 9);
        assert_eq!(Occupancy::from_value(json!({ "message": "ok" })).count, 0);
        assert_eq!(Occupancy::from_value(json!(null)).count, 0);
    }

    #[test]
    fn zone_rows_accept_alias_spellings() {
        let row: ZoneTemperature =
            serde_json::from_value(json!({ "zoneName": "Cardio", "value": 23.5 })).unwrap();
        assert_eq!(row.zone, "Cardio");
        assert_eq!(row.temperature, 23.5);

        let row: ZoneHumidity =
            serde_json::from_value(json!({ "zone": "Pesas", "humidity": 61.0 })).unwrap();
        assert_eq!(row.zone, "Pesas");
        assert_eq!(row.humidity, 61.0);
    }
}
