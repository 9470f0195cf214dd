//! Member registry synchronization.

use async_trait::async_trait;
use validator::Validate;

use crate::api::{self, ApiClient, ApiResult, Method, RequestOptions};
use crate::domain::environment::{fetch_occupancy, Occupancy};
use crate::support::AppResult;
use crate::sync::{RemovalMode, ResourceAdapter};

use super::model::{Client, ClientDraft};

const ENTITY_KEYS: &[&str] = &["client", "user", "data"];

pub struct ClientAdapter;

#[async_trait]
impl ResourceAdapter for ClientAdapter {
    type Record = Client;
    type Aux = Occupancy;
    type Draft = ClientDraft;

    fn name(&self) -> &'static str {
        "clients"
    }

    fn removal_mode(&self) -> RemovalMode {
        RemovalMode::SoftDeactivate {
            retain_in_list: false,
        }
    }

    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<Client>, Occupancy)> {
        let (clients, occupancy) = tokio::try_join!(fetch_clients(api), fetch_occupancy(api))?;
        Ok((clients, occupancy))
    }

    fn validate(&self, draft: &ClientDraft) -> AppResult<()> {
        draft.validate()?;
        Ok(())
    }

    async fn create(&self, api: &ApiClient, draft: &ClientDraft) -> AppResult<Client> {
        let value = api
            .request(
                Method::POST,
                "/api/client/create",
                RequestOptions::with_body(draft.wire_body()),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    async fn update(&self, api: &ApiClient, id: &str, draft: &ClientDraft) -> AppResult<Client> {
        let value = api
            .request(
                Method::PUT,
                &format!("/api/client/update/{id}"),
                RequestOptions::with_body(draft.wire_body()),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    async fn remove(&self, api: &ApiClient, id: &str) -> AppResult<()> {
        api.request(
            Method::PUT,
            &format!("/api/client/delete/{id}"),
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }
}

async fn fetch_clients(api: &ApiClient) -> ApiResult<Vec<Client>> {
    let value = api
        .request(Method::GET, "/api/client/clients", RequestOptions::default())
        .await?;
    api::decode_list(value, &["clients", "data"])
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::auth::UserProfile;
    use crate::domain::client::model::MembershipType;
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
    async fn fetch_joins_the_member_list_with_todays_occupancy() {
        let router = Router::new()
            .route(
                "/api/client/clients",
                get(|| async {
                    Json(json!({ "clients": [
                        { "_id": "c1", "name": "Ana López", "membershipType": "Premium" },
                        { "_id": "c2", "name": "Carlos Martínez", "membershipType": "Básica" },
                    ]}))
                }),
            )
            .route("/api/sensor/people-countToday", get(|| async { Json(json!(3)) }));
        let api = api_for(spawn_server(router).await);

        let (clients, occupancy) = ClientAdapter.fetch(&api).await.unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Ana López");
        assert_eq!(occupancy.count, 3);
    }

    #[tokio::test]
    async fn a_failing_occupancy_feed_discards_the_member_list_too() {
        let router = Router::new()
            .route(
                "/api/client/clients",
                get(|| async { Json(json!([{ "_id": "c1", "name": "Ana" }])) }),
            )
            .route(
                "/api/sensor/people-countToday",
                get(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "message": "counter down" }))) }),
            );
        let api = api_for(spawn_server(router).await);

        let err = ClientAdapter.fetch(&api).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn create_sends_the_registration_body_and_decodes_the_envelope() {
        let router = Router::new().route(
            "/api/client/create",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["name"], json!("Laura Fernández"));
                assert_eq!(body["membershipType"], json!("Estudiante"));
                assert_eq!(body["active"], json!(true));
                Json(json!({ "client": {
                    "_id": "c9",
                    "name": body["name"],
                    "membershipType": body["membershipType"],
                    "active": true,
                }}))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let draft = ClientDraft {
            name: "Laura Fernández".into(),
            membership_type: MembershipType::Student,
            photo: None,
        };
        let created = ClientAdapter.create(&api, &draft).await.unwrap();
        assert_eq!(created.id, "c9");
        assert_eq!(created.membership_type, MembershipType::Student);
    }

    #[tokio::test]
    async fn remove_hits_the_deactivation_endpoint() {
        let router = Router::new().route(
            "/api/client/delete/{id}",
            put(|Path(id): Path<String>| async move {
                assert_eq!(id, "c1");
                Json(json!({ "message": "cliente dado de baja" }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        ClientAdapter.remove(&api, "c1").await.unwrap();
    }
}
