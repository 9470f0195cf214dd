//! Order board synchronization.

use async_trait::async_trait;
use serde_json::json;

use crate::api::{self, ApiClient, ApiResult, Method, RequestOptions};
use crate::domain::employee::{fetch_users, Employee};
use crate::domain::product::Product;
use crate::support::{AppError, AppResult};
use crate::sync::{RemovalMode, ResourceAdapter};

use super::model::{Order, OrderDraft};

const ENTITY_KEYS: &[&str] = &["order", "data"];

/// Display name when an order's creator account no longer resolves.
pub const UNKNOWN_USER: &str = "Desconocido";

pub struct OrderAdapter;

/// Reference data the order cards resolve against: the user accounts
/// behind `IDUser` and the product catalog behind each line's SKU.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    pub users: Vec<Employee>,
    pub catalog: Vec<Product>,
}

impl OrderBoard {
    /// Creator display name, or [`UNKNOWN_USER`] when the account is
    /// missing or gone.
    pub fn creator_name(&self, creator_id: Option<&str>) -> &str {
        creator_id
            .and_then(|id| self.users.iter().find(|user| user.id == id))
            .map(Employee::display_name)
            .unwrap_or(UNKNOWN_USER)
    }

    /// Catalog entry behind an order line.
    pub fn product_for_sku(&self, sku: &str) -> Option<&Product> {
        self.catalog.iter().find(|product| product.sku == sku)
    }
}

#[async_trait]
impl ResourceAdapter for OrderAdapter {
    type Record = Order;
    type Aux = OrderBoard;
    type Draft = OrderDraft;

    fn name(&self) -> &'static str {
        "orders"
    }

    /// Cancelled orders stay on the board with their status flipped.
    fn removal_mode(&self) -> RemovalMode {
        RemovalMode::SoftDeactivate {
            retain_in_list: true,
        }
    }

    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<Order>, OrderBoard)> {
        let (mut orders, users, catalog) =
            tokio::try_join!(fetch_orders(api), fetch_users(api), fetch_catalog(api))?;
        fill_missing_ids(&mut orders);
        Ok((orders, OrderBoard { users, catalog }))
    }

    fn validate(&self, draft: &OrderDraft) -> AppResult<()> {
        if let OrderDraft::New(order) = draft {
            if order.lines.is_empty() || order.lines.iter().any(|line| line.quantity == 0) {
                return Err(AppError::validation(
                    "every line needs a resolvable product and a quantity above zero",
                ));
            }
        }
        Ok(())
    }

    async fn create(&self, api: &ApiClient, draft: &OrderDraft) -> AppResult<Order> {
        let OrderDraft::New(order) = draft else {
            return Err(AppError::validation("order creation needs line items"));
        };
        let value = api
            .request(
                Method::POST,
                "/api/order/create",
                RequestOptions::with_body(order.wire_body()),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    async fn update(&self, api: &ApiClient, id: &str, draft: &OrderDraft) -> AppResult<Order> {
        let OrderDraft::Status(status) = draft else {
            return Err(AppError::validation("order updates only change the status"));
        };
        let value = api
            .request(
                Method::PUT,
                &format!("/api/order/order/update/{id}"),
                RequestOptions::with_body(json!({ "Status": status })),
            )
            .await?;
        Ok(api::decode_entity(value, ENTITY_KEYS)?)
    }

    /// Cancellation goes through the delete route, which flips the
    /// status server side rather than removing the document.
    async fn remove(&self, api: &ApiClient, id: &str) -> AppResult<()> {
        api.request(
            Method::PUT,
            &format!("/api/order/delete/{id}"),
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }
}

async fn fetch_orders(api: &ApiClient) -> ApiResult<Vec<Order>> {
    let value = api
        .request(Method::GET, "/api/order/orders", RequestOptions::default())
        .await?;
    api::decode_list(value, &["orders", "orderList", "data"])
}

async fn fetch_catalog(api: &ApiClient) -> ApiResult<Vec<Product>> {
    let value = api
        .request(Method::GET, "/api/product/products", RequestOptions::default())
        .await?;
    api::decode_list(value, &["products", "data"])
}

/// The `orderList` shape has shipped entries without an `_id`; give
/// those positional ids so the board can still key them.
fn fill_missing_ids(orders: &mut [Order]) {
    for (index, order) in orders.iter_mut().enumerate() {
        if order.id.is_empty() {
            order.id = format!("fake-id-{index}");
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::auth::UserProfile;
    use crate::domain::order::model::{NewOrder, OrderLine, OrderStatus};
    use crate::session::SessionStore;
    use crate::sync::Synchronizer;

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

    fn reference_routes(router: Router) -> Router {
        router
            .route(
                "/api/auth/users",
                get(|| async {
                    Json(json!({ "users": [
                        { "_id": "u1", "username": "mgarcia", "firstName": "María", "email": "m@primegym.mx" },
                    ]}))
                }),
            )
            .route(
                "/api/product/products",
                get(|| async {
                    Json(json!([{
                        "_id": "p1", "sku": "PROT-WH001", "name": "Proteína Whey",
                        "categoria": "Proteínas", "price": 850.0, "stock": 25,
                    }]))
                }),
            )
    }

    #[tokio::test]
    async fn fetch_joins_orders_with_users_and_catalog() {
        let router = reference_routes(Router::new().route(
            "/api/order/orders",
            get(|| async {
                Json(json!({ "orders": [{
                    "_id": "o1",
                    "IDUser": "u1",
                    "Status": "Pending",
                    "Products": [{ "sku": "PROT-WH001", "quantity": 2 }],
                    "Subtotal": 1700.0,
                    "Total": 1972.0,
                }]}))
            }),
        ));
        let api = api_for(spawn_server(router).await);

        let (orders, board) = OrderAdapter.fetch(&api).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(board.creator_name(orders[0].creator_id.as_deref()), "María");
        assert_eq!(board.creator_name(Some("gone")), UNKNOWN_USER);
        assert_eq!(board.creator_name(None), UNKNOWN_USER);
        assert_eq!(
            board.product_for_sku("PROT-WH001").map(|p| p.name.as_str()),
            Some("Proteína Whey"),
        );
    }

    #[tokio::test]
    async fn order_list_envelopes_get_positional_ids_when_missing() {
        let router = reference_routes(Router::new().route(
            "/api/order/orders",
            get(|| async {
                Json(json!({ "orderList": [
                    { "Status": "Payed", "Total": 116.0 },
                    { "_id": "o7", "Status": "Pending" },
                    { "Status": "Cancelled" },
                ]}))
            }),
        ));
        let api = api_for(spawn_server(router).await);

        let (orders, _) = OrderAdapter.fetch(&api).await.unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["fake-id-0", "o7", "fake-id-2"]);
        assert_eq!(orders[0].status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn create_posts_the_order_body() {
        let router = reference_routes(Router::new()).route(
            "/api/order/create",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["Status"], json!("Pending"));
                assert_eq!(body["Products"], json!([{ "sku": "PROT-WH001", "quantity": 2 }]));
                assert_eq!(body["Subtotal"], json!(1700.0));
                assert_eq!(body["Total"], json!(1972.0));
                Json(json!({ "order": {
                    "_id": "o9",
                    "Status": "Pending",
                    "Products": body["Products"],
                    "Subtotal": body["Subtotal"],
                    "Total": body["Total"],
                }}))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let draft = OrderDraft::New(NewOrder {
            lines: vec![OrderLine {
                sku: "PROT-WH001".into(),
                quantity: 2,
            }],
            subtotal: 1700.0,
            total: 1972.0,
        });
        let created = OrderAdapter.create(&api, &draft).await.unwrap();
        assert_eq!(created.id, "o9");
        assert!(created.is_pending());
    }

    #[tokio::test]
    async fn status_update_sends_only_the_wire_status() {
        let router = Router::new().route(
            "/api/order/order/update/{id}",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(id, "o1");
                assert_eq!(body, json!({ "Status": "Payed" }));
                Json(json!({ "order": { "_id": "o1", "Status": "Payed" } }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        let updated = OrderAdapter
            .update(&api, "o1", &OrderDraft::Status(OrderStatus::Paid))
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn cancel_hits_the_delete_route_without_a_body() {
        let router = Router::new().route(
            "/api/order/delete/{id}",
            put(|Path(id): Path<String>, body: String| async move {
                assert_eq!(id, "o1");
                assert!(body.is_empty());
                Json(json!({ "message": "orden cancelada" }))
            }),
        );
        let api = api_for(spawn_server(router).await);

        OrderAdapter.remove(&api, "o1").await.unwrap();
    }

    #[tokio::test]
    async fn mismatched_draft_shapes_never_reach_the_backend() {
        let api = api_for("http://127.0.0.1:9".to_owned());

        let err = OrderAdapter
            .create(&api, &OrderDraft::Status(OrderStatus::Paid))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let order = NewOrder {
            lines: vec![OrderLine {
                sku: "PROT-WH001".into(),
                quantity: 1,
            }],
            subtotal: 850.0,
            total: 986.0,
        };
        let err = OrderAdapter
            .update(&api, "o1", &OrderDraft::New(order))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn a_cancelled_order_stays_on_the_board() {
        let router = reference_routes(
            Router::new()
                .route(
                    "/api/order/orders",
                    get(|| async {
                        Json(json!({ "orders": [
                            { "_id": "o1", "Status": "Pending", "Total": 116.0 },
                            { "_id": "o2", "Status": "Payed", "Total": 232.0 },
                        ]}))
                    }),
                )
                .route(
                    "/api/order/delete/{id}",
                    put(|Path(_): Path<String>| async { Json(json!({ "message": "ok" })) }),
                ),
        );
        let api = Arc::new(api_for(spawn_server(router).await));

        let sync = Synchronizer::shared(OrderAdapter, api);
        sync.load().await.unwrap();
        sync.remove("o1").await.unwrap();

        let snapshot = sync.snapshot();
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].status, OrderStatus::Cancelled);
        assert_eq!(snapshot.active().count(), 1);
    }
}
