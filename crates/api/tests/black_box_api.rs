use orderdesk_api::app::state::{self, Store};
use reqwest::StatusCode;
use serde_json::json;

const WEBHOOK_SECRET: &str = "test-signature";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Store) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = orderdesk_api::app::build_app(state::shared(store), WEBHOOK_SECRET.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product_body(sku: &str, price: f64, stock: i64) -> serde_json::Value {
    json!({ "sku": sku, "name": "Test Product", "price": price, "stock": stock })
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    // Create
    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 10.0, 5))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["sku"], "SKU-001");

    // Get
    let res = client
        .get(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // List is a bare array in creation order.
    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-002", 20.0, 1))
        .send()
        .await
        .unwrap();
    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[1]["id"], 2);

    // Update overwrites all fields.
    let res = client
        .put(format!("{}/products/1", srv.base_url))
        .json(&json!({ "sku": "SKU-NEW", "name": "Renamed", "price": 3.5, "stock": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["sku"], "SKU-NEW");
    assert_eq!(updated["stock"], 7);

    // Delete, then the id is gone.
    let res = client
        .delete(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = client
        .get(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sku_is_conflict_and_invalid_fields_are_bad_request() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 10.0, 5))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 12.0, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-002", 0.0, 5))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-002", 1.0, -1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_creation_reserves_stock_and_reports_conflicts() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("X1", 10.0, 2))
        .send()
        .await
        .unwrap();

    // Requesting more than available: conflict, stock untouched.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Available: 2, requested: 3"));

    let res = client
        .get(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 2);

    // Exact fit succeeds and drains the stock.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["id"], 1);
    assert_eq!(order["status"], "PENDING");

    let res = client
        .get(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 0);

    // Unknown product and non-positive quantity.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 99, "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_status_update_via_query_parameter() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 10.0, 5))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": 1 }))
        .send()
        .await
        .unwrap();

    let res = client
        .put(format!("{}/orders/1?new_status=SHIPPED", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["status"], "SHIPPED");

    let res = client
        .put(format!("{}/orders/1?new_status=DELIVERED", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(format!("{}/orders/99?new_status=PAID", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // A missing order wins over an invalid status value.
    let res = client
        .put(format!("{}/orders/99?new_status=DELIVERED", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_deletion_requires_pending_and_keeps_stock_reserved() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 10.0, 5))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": 3 }))
        .send()
        .await
        .unwrap();

    // Non-PENDING orders cannot be deleted.
    client
        .put(format!("{}/orders/1?new_status=SHIPPED", srv.base_url))
        .send()
        .await
        .unwrap();
    let res = client
        .delete(format!("{}/orders/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Back to PENDING, delete succeeds, stock stays reserved.
    client
        .put(format!("{}/orders/1?new_status=PENDING", srv.base_url))
        .send()
        .await
        .unwrap();
    let res = client
        .delete(format!("{}/orders/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/products/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["stock"], 2);
}

#[tokio::test]
async fn payment_webhook_requires_signature_and_filters_events() {
    let srv = TestServer::spawn(Store::new()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-001", 10.0, 5))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": 1, "quantity": 1 }))
        .send()
        .await
        .unwrap();

    // Bad signature.
    let res = client
        .post(format!(
            "{}/webhooks/payment?signature=wrong",
            srv.base_url
        ))
        .json(&json!({ "event": "payment.succeeded", "order_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Other events are acknowledged without mutation.
    let res = client
        .post(format!(
            "{}/webhooks/payment?signature={}",
            srv.base_url, WEBHOOK_SECRET
        ))
        .json(&json!({ "event": "payment.failed", "order_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client
        .get(format!("{}/orders/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["status"], "PENDING");

    // Unknown order id.
    let res = client
        .post(format!(
            "{}/webhooks/payment?signature={}",
            srv.base_url, WEBHOOK_SECRET
        ))
        .json(&json!({ "event": "payment.succeeded", "order_id": 99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Happy path: PAID regardless of prior status, even CANCELED.
    client
        .put(format!("{}/orders/1?new_status=CANCELED", srv.base_url))
        .send()
        .await
        .unwrap();
    let res = client
        .post(format!(
            "{}/webhooks/payment?signature={}",
            srv.base_url, WEBHOOK_SECRET
        ))
        .json(&json!({ "event": "payment.succeeded", "order_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/orders/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["status"], "PAID");
}

#[tokio::test]
async fn seeded_store_consumes_the_first_three_product_ids() {
    let srv = TestServer::spawn(Store::seeded()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[2]["id"], 3);

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&product_body("SKU-100", 10.0, 5))
        .send()
        .await
        .unwrap();
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 4);
}
