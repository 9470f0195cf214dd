//! Staff list synchronization.
//!
//! Listing and deactivation only; account creation and editing live in a
//! separate back-office flow.

use async_trait::async_trait;
use serde_json::json;

use crate::api::{self, ApiClient, ApiResult, Method, RequestOptions};
use crate::support::AppResult;
use crate::sync::{RemovalMode, ResourceAdapter};

use super::model::Employee;

pub struct EmployeeAdapter;

#[async_trait]
impl ResourceAdapter for EmployeeAdapter {
    type Record = Employee;
    type Aux = ();
    type Draft = ();

    fn name(&self) -> &'static str {
        "employees"
    }

    fn removal_mode(&self) -> RemovalMode {
        RemovalMode::SoftDeactivate {
            retain_in_list: true,
        }
    }

    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<Employee>, ())> {
        let employees = fetch_users(api).await?;
        Ok((employees, ()))
    }

    async fn remove(&self, api: &ApiClient, id: &str) -> AppResult<()> {
        // The deactivation endpoint expects a JSON body, even an empty one.
        api.request(
            Method::PUT,
            &format!("/api/auth/users/delete/{id}"),
            RequestOptions::with_body(json!({})),
        )
        .await?;
        Ok(())
    }
}

/// Shared with the order board, which resolves creator names against the
/// same user list.
pub(crate) async fn fetch_users(api: &ApiClient) -> ApiResult<Vec<Employee>> {
    let value = api
        .request(Method::GET, "/api/auth/users", RequestOptions::default())
        .await?;
    api::decode_list(value, &["users", "data"])
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::auth::UserProfile;
    use crate::session::SessionStore;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn api_for(base: String) -> ApiClient {
        let session = Arc::new(SessionStore::in_memory());
        let profile: UserProfile =
            serde_json::from_value(json!({ "_id": "u1", "username": "coach" })).unwrap();
        session.set_session("tok", profile);
        ApiClient::new(base, Duration::from_secs(5), session).unwrap()
    }

    #[tokio::test]
    async fn fetch_reads_the_bare_user_array() {
        let router = Router::new().route(
            "/api/auth/users",
            get(|| async {
                Json(json!([
                    { "_id": "u1", "username": "mgarcia", "firstName": "María", "status": true },
                    { "_id": "u2", "username": "jlopez", "status": false },
                ]))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let (employees, ()) = EmployeeAdapter.fetch(&api).await.unwrap();
        assert_eq!(employees.len(), 2);
        assert!(!employees[1].status);
    }

    #[tokio::test]
    async fn remove_puts_an_empty_json_object() {
        let router = Router::new().route(
            "/api/auth/users/delete/{id}",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(id, "u2");
                assert_eq!(body, json!({}));
                Json(json!({ "message": "usuario desactivado" }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        EmployeeAdapter.remove(&api, "u2").await.unwrap();
    }

    #[tokio::test]
    async fn account_creation_is_not_available_here() {
        let api = api_for("http://127.0.0.1:9".to_string());
        let err = EmployeeAdapter.create(&api, &()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "employees does not support create");
    }
}
