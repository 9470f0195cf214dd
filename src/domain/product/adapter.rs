//! Inventory synchronization.

use async_trait::async_trait;
use validator::Validate;

use crate::api::{self, ApiClient, ApiResult, Method, RequestOptions};
use crate::support::AppResult;
use crate::sync::{RemovalMode, ResourceAdapter};

use super::model::{Product, ProductDraft};

const ENTITY_KEYS: &[&str] = &["product", "data"];

pub struct ProductAdapter;

#[async_trait]
impl ResourceAdapter for ProductAdapter {
    type Record = Product;
    type Aux = ();
    type Draft = ProductDraft;

    fn name(&self) -> &'static str {
        "products"
    }

    fn removal_mode(&self) -> RemovalMode {
        RemovalMode::SoftDeactivate {
            retain_in_list: false,
        }
    }

    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<Product>, ())> {
        let value = api
            .request(
                Method::GET,
                "/api/product/products",
                RequestOptions::default(),
            )
            .await?;
        let products = api::decode_list(value, &["products", "data"])?;
        Ok((products, ()))
    }

    fn validate(&self, draft: &ProductDraft) -> AppResult<()> {
        draft.validate()?;
        Ok(())
    }

    async fn create(&self, api: &ApiClient, draft: &ProductDraft) -> AppResult<Product> {
        let value = api
            .request(
                Method::POST,
                "/api/product/create",
                RequestOptions::with_body(draft.wire_body()),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    async fn update(&self, api: &ApiClient, id: &str, draft: &ProductDraft) -> AppResult<Product> {
        let value = api
            .request(
                Method::PUT,
                &format!("/api/product/product/{id}"),
                RequestOptions::with_body(draft.wire_body()),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    async fn remove(&self, api: &ApiClient, id: &str) -> AppResult<()> {
        api.request(
            Method::PATCH,
            &format!("/api/product/product/delete/{id}"),
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::routing::{get, patch, post};
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
    async fn fetch_accepts_the_bare_catalog_array() {
        let router = Router::new().route(
            "/api/product/products",
            get(|| async {
                Json(json!([
                    { "_id": "p1", "sku": "PROT-WH001", "name": "Proteína Whey", "categoria": "Proteínas", "price": 850.0, "stock": 25 },
                    { "_id": "p2", "sku": "CREA-MON005", "name": "Creatina", "categoria": "Creatinas", "price": 450.0, "stock": 8 },
                ]))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let (products, ()) = ProductAdapter.fetch(&api).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].sku, "CREA-MON005");
    }

    #[tokio::test]
    async fn create_posts_the_wire_body() {
        let router = Router::new().route(
            "/api/product/create",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["categoria"], json!("Accesorios"));
                Json(json!({
                    "_id": "p9",
                    "sku": body["sku"],
                    "name": body["name"],
                    "categoria": body["categoria"],
                    "price": body["price"],
                    "stock": body["stock"],
                }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let draft = ProductDraft {
            sku: "ACC-SHK003".into(),
            name: "Shaker Prime Gym Logo".into(),
            category: "Accesorios".into(),
            description: None,
            price: 150.0,
            stock: 50,
        };
        let created = ProductAdapter.create(&api, &draft).await.unwrap();
        assert_eq!(created.id, "p9");
        assert_eq!(created.category, "Accesorios");
    }

    #[tokio::test]
    async fn remove_patches_the_soft_delete_endpoint() {
        let router = Router::new().route(
            "/api/product/product/delete/{id}",
            patch(|Path(id): Path<String>| async move {
                assert_eq!(id, "p1");
                Json(json!({ "message": "producto desactivado" }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        ProductAdapter.remove(&api, "p1").await.unwrap();
    }

    #[test]
    fn invalid_draft_is_rejected_before_any_request() {
        let draft = ProductDraft {
            sku: String::new(),
            name: "Sin SKU".into(),
            category: "Ropa".into(),
            description: None,
            price: 10.0,
            stock: 1,
        };
        let err = ProductAdapter.validate(&draft).unwrap_err();
        assert!(err.is_validation());
    }
}
