//! HTTP client for the gym management API.
//!
//! One `ApiClient` is shared by every synchronizer. It reads the bearer
//! token from the session store at call time, so a login or logout between
//! two calls is honored by the later one.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::error::{self, ApiError, ApiResult};
use crate::session::SharedSessionStore;

const USER_AGENT: &str = concat!("primegym-console/", env!("CARGO_PKG_VERSION"));

/// Optional parts of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// JSON body; sets `Content-Type: application/json` when present.
    pub body: Option<Value>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }
}

/// Client over the remote REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSessionStore,
}

impl ApiClient {
    /// Build a client against a base URL (no trailing slash required).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SharedSessionStore,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session store this client reads its credential from.
    pub fn session(&self) -> &SharedSessionStore {
        &self.session
    }

    /// Issue a request and normalize the response.
    ///
    /// Success statuses decode the body as JSON (empty bodies read as
    /// null). Failure statuses become [`ApiError::Http`] with the message
    /// taken from the body's `message` field when one parses out.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        trace!(%method, path, "api request");
        let res = req.send().await.map_err(error::from_transport)?;
        let status = res.status();
        let text = res.text().await.map_err(error::from_transport)?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            debug!(%method, path, status = status.as_u16(), "api request failed");
            Err(ApiError::Http {
                status: status.as_u16(),
                message: error::extract_error_message(&text),
            })
        }
    }

    /// Fetch a binary document (report PDFs).
    pub async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.get(&url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }

        let res = req.send().await.map_err(error::from_transport)?;
        let status = res.status();
        if status.is_success() {
            res.bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(error::from_transport)
        } else {
            let text = res.text().await.unwrap_or_default();
            Err(ApiError::Http {
                status: status.as_u16(),
                message: error::extract_error_message(&text),
            })
        }
    }

    // ── Typed helpers ──────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self
            .request(Method::GET, path, RequestOptions::default())
            .await?;
        super::decode(value)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let value = self
            .request(method, path, RequestOptions::with_body(body))
            .await?;
        super::decode(value)
    }
}

// ── Tests ──────────────────────────────────────────────────────
