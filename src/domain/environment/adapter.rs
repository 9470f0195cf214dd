//! Read-only synchronization of the sensor endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{self, ApiClient, ApiResult, Method, RequestOptions};
use crate::sync::{RemovalMode, ResourceAdapter};

use super::model::{
    merge_zones, EnvironmentOverview, Occupancy, ZoneClimate, ZoneHumidity, ZoneTemperature,
};

pub struct EnvironmentAdapter;

#[async_trait]
impl ResourceAdapter for EnvironmentAdapter {
    type Record = ZoneClimate;
    type Aux = EnvironmentOverview;
    type Draft = ();

    fn name(&self) -> &'static str {
        "environment"
    }

    /// Sensors are read-only; the default mutation rejections apply and
    /// this mode is never exercised.
    fn removal_mode(&self) -> RemovalMode {
        RemovalMode::HardDelete
    }

    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<ZoneClimate>, EnvironmentOverview)> {
        let (occupancy, temperature, humidity, zone_temperatures, zone_humidity) = tokio::try_join!(
            fetch_occupancy(api),
            fetch_scalar(api, "/api/sensor/temperature", &["temperature", "value", "avg"]),
            fetch_scalar(api, "/api/sensor/humidity", &["humidity", "value", "avg"]),
            fetch_rows::<ZoneTemperature>(
                api,
                "/api/sensor/temperatureByZone",
                &["temperatures", "zones", "data"],
            ),
            fetch_rows::<ZoneHumidity>(
                api,
                "/api/sensor/humidityByZone",
                &["humidity", "zones", "data"],
            ),
        )?;

        let zones = merge_zones(zone_temperatures, zone_humidity);
        let overview = EnvironmentOverview {
            occupancy,
            temperature,
            humidity,
        };
        Ok((zones, overview))
    }
}

/// Today's occupancy, also joined into the member registry view.
pub(crate) async fn fetch_occupancy(api: &ApiClient) -> ApiResult<Occupancy> {
    let value = api
        .request(
            Method::GET,
            "/api/sensor/people-countToday",
            RequestOptions::default(),
        )
        .await?;
    Ok(Occupancy::from_value(value))
}

async fn fetch_scalar(api: &ApiClient, path: &str, keys: &[&str]) -> ApiResult<f64> {
    let value = api
        .request(Method::GET, path, RequestOptions::default())
        .await?;
    Ok(scalar_reading(&value, keys))
}

fn scalar_reading(value: &Value, keys: &[&str]) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Object(map) => keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_f64))
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

async fn fetch_rows<T: DeserializeOwned>(
    api: &ApiClient,
    path: &str,
    keys: &[&str],
) -> ApiResult<Vec<T>> {
    let value = api
        .request(Method::GET, path, RequestOptions::default())
        .await?;
    api::decode_list(value, keys)
}

// ── Tests ──────────────────────────────────────────────────────
