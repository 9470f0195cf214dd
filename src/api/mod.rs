//! REST API client module
//!
//! Builds authenticated requests against the configured base URL and
//! normalizes success/error responses into typed results. Also hosts the
//! decoding helpers that tolerate the backend's envelope wobble (bare
//! lists vs `{"orders": [...]}` style wrappers).

pub mod client;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, ApiResult};
pub use reqwest::Method;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a JSON value into a typed record.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode an entity that may arrive bare or wrapped under one of `keys`.
pub fn decode_entity<T: DeserializeOwned>(value: Value, keys: &[&str]) -> ApiResult<T> {
    match value {
        Value::Object(mut map) => {
            for key in keys {
                if let Some(inner) = map.remove(*key) {
                    if !inner.is_null() {
                        return decode(inner);
                    }
                }
            }
            decode(Value::Object(map))
        }
        other => decode(other),
    }
}

/// Decode a list that may arrive bare or wrapped under one of `keys`.
///
/// An object carrying none of the keys decodes as an empty list; the
/// backend has answered empty result sets that way.
pub fn decode_list<T: DeserializeOwned>(value: Value, keys: &[&str]) -> ApiResult<Vec<T>> {
    match value {
        Value::Array(_) => decode(value),
        Value::Object(mut map) => {
            for key in keys {
                if let Some(inner) = map.remove(*key) {
                    if inner.is_array() {
                        return decode(inner);
                    }
                }
            }
            Ok(Vec::new())
        }
        Value::Null => Ok(Vec::new()),
        other => Err(ApiError::Decode(format!(
            "expected a list, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ──────────────────────────────────────────────────────
