use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        // No USE_PERSISTENT_STORE in the test env, so each server gets a
        // fresh in-memory store.
        let app = warehouse_api::app::build_app().await;
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

async fn create_product(client: &reqwest::Client, base_url: &str, sku: &str) -> String {
    let res = client
        .post(format!("{}/products", base_url))
        .json(&json!({ "sku": sku, "name": "Test Product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    created["id"].as_str().unwrap().to_string()
}

fn field_names(body: &serde_json::Value) -> Vec<&str> {
    body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_representation_without_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "sku": "1234567890", "name": "Test Product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["sku"], "1234567890");
    assert_eq!(body["name"], "Test Product");
    assert_eq!(body["description"], serde_json::Value::Null);
    assert!(body.get("stock").is_none());
}

#[tokio::test]
async fn create_defaults_stock_to_100() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // Stock is only observable through the stock-mutating endpoints.
    let res = client
        .patch(format!("{}/inventories/product/{}", srv.base_url, id))
        .json(&json!({ "stock": 20 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 120);
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // List
    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Retrieve
    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["name"], "Test Product");

    // Partial update
    let res = client
        .patch(format!("{}/products/{}", srv.base_url, id))
        .json(&json!({ "name": "Updated Product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Updated Product");
    assert_eq!(updated["sku"], "1234567890");

    // PUT behaves like PATCH (partial semantics)
    let res = client
        .put(format!("{}/products/{}", srv.base_url, id))
        .json(&json!({ "description": "A very useful product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["description"], "A very useful product");
    assert_eq!(updated["name"], "Updated Product");

    // Delete
    let res = client
        .delete(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_collects_every_field_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "sku": "123", "name": "abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(field_names(&body), vec!["sku", "name"]);
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "1234567890").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "sku": "1234567890", "name": "Another Product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_sku");
    assert_eq!(field_names(&body), vec!["sku"]);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn top_up_adds_to_existing_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // Drain the default 100 down to 10 first.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 90 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["remaining_stock"], 10);

    // Stock 10, top-up 20 -> 30.
    let res = client
        .patch(format!("{}/inventories/product/{}", srv.base_url, id))
        .json(&json!({ "stock": 20 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "stock updated successfully");
    assert_eq!(body["new_stock"], 30);
}

#[tokio::test]
async fn top_up_rejects_bad_amounts_citing_the_stock_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    for amount in [-5, 0, 10_001] {
        let res = client
            .patch(format!("{}/inventories/product/{}", srv.base_url, id))
            .json(&json!({ "stock": amount }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "amount {amount}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(field_names(&body), vec!["stock"]);
    }

    // None of the rejected calls mutated anything.
    let res = client
        .patch(format!("{}/inventories/product/{}", srv.base_url, id))
        .json(&json!({ "stock": 1 }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 101);
}

#[tokio::test]
async fn top_up_unknown_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!(
            "{}/inventories/product/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .json(&json!({ "stock": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_decrements_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // Bring stock from the default 100 down to 20.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 80 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Stock 20, order 5 -> remaining 15.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "order placed successfully");
    assert_eq!(body["remaining_stock"], 15);
}

#[tokio::test]
async fn order_exceeding_stock_is_refused_without_mutation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 101 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    // Stock is untouched: an order for the full amount still fits.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["remaining_stock"], 0);
}

#[tokio::test]
async fn order_validation_failures_name_the_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // Unknown product
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": uuid::Uuid::now_v7().to_string(), "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(field_names(&body), vec!["product_id"]);

    // Malformed product id
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": "not-a-uuid", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(field_names(&body), vec!["product_id"]);

    // Zero quantity
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(field_names(&body), vec!["quantity"]);
}

#[tokio::test]
async fn concurrent_orders_where_only_one_fits() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_product(&client, &srv.base_url, "1234567890").await;

    // Down to stock 5.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .json(&json!({ "product_id": id, "quantity": 95 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Two concurrent orders of 4: only one can fit.
    let (a, b) = tokio::join!(
        client
            .post(format!("{}/orders", srv.base_url))
            .json(&json!({ "product_id": id, "quantity": 4 }))
            .send(),
        client
            .post(format!("{}/orders", srv.base_url))
            .json(&json!({ "product_id": id, "quantity": 4 }))
            .send(),
    );
    let statuses = [a.unwrap().status(), b.unwrap().status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count(),
        1
    );

    // Final stock is 1 (5 - 4), observable via a top-up.
    let res = client
        .patch(format!("{}/inventories/product/{}", srv.base_url, id))
        .json(&json!({ "stock": 9 }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 10);
}

#[tokio::test]
async fn unknown_and_malformed_ids_on_product_routes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let unknown = uuid::Uuid::now_v7();
    let res = client
        .get(format!("{}/products/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .patch(format!("{}/products/{}", srv.base_url, unknown))
        .json(&json!({ "name": "Updated Product" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/products/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/products/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
