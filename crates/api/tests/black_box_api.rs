use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use catalog_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let app = build_app(Arc::new(AppServices::in_memory()));
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

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create(
    client: &reqwest::Client,
    srv: &TestServer,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(srv.url("/products"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &srv,
        json!({ "name": "Chair", "description": "Wood", "price": 9999, "stock": 10 }),
    )
    .await;

    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["name"], "Chair");
    assert_eq!(created["description"], "Wood");
    assert_eq!(created["price"].as_f64(), Some(9999.0));
    assert_eq!(created["stock"], 10);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &srv,
        json!({ "id": 777, "name": "Table", "price": 120.5 }),
    )
    .await;

    assert_ne!(created["id"], 777);
    assert_eq!(created["stock"], 0);
}

#[tokio::test]
async fn invalid_body_returns_400_with_field_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .json(&json!({ "name": "", "price": -10, "stock": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["timestamp"].is_string());
    assert_eq!(body["errors"]["name"], "Name is required");
    assert_eq!(body["errors"]["price"], "Price must be greater than 0");
    assert_eq!(body["errors"]["stock"], "Stock cannot be negative");
}

#[tokio::test]
async fn missing_price_is_reported_as_required() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .json(&json!({ "name": "Lamp" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errors"]["price"], "Price is required");
}

#[tokio::test]
async fn malformed_json_returns_400_with_message() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn get_missing_product_returns_404_naming_the_id() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/products/4242")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert!(body["message"].as_str().unwrap().contains("4242"));
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/products/abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_lifecycle_create_get_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &srv,
        json!({ "name": "Desk", "description": "Oak", "price": 250, "stock": 3 }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Get
    let res = reqwest::get(srv.url(&format!("/products/{id}"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Update (body id is ignored)
    let res = client
        .put(srv.url(&format!("/products/{id}")))
        .json(&json!({ "id": id + 100, "name": "Standing desk", "price": 499.99, "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Standing desk");
    assert!(updated["description"].is_null());
    assert!((updated["price"].as_f64().unwrap() - 499.99).abs() < 1e-9);

    // Invalid update
    let res = client
        .put(srv.url(&format!("/products/{id}")))
        .json(&json!({ "name": "Standing desk", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Delete, then delete again
    let res = client
        .delete(srv.url(&format!("/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(srv.url(&format!("/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_product_returns_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/products/9"))
        .json(&json!({ "name": "Ghost", "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_ordered_by_price_regardless_of_insertion_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv, json!({ "name": "Product 2", "price": 29.99, "stock": 10 })).await;
    create(&client, &srv, json!({ "name": "Product 1", "price": 19.99, "stock": 5 })).await;

    let res = reqwest::get(srv.url("/products")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    let names: Vec<_> = items.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Product 1", "Product 2"]);
}

#[tokio::test]
async fn create_echoes_price_digit_for_digit() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for raw in ["12345678901234567.89", "0.00001", "19.90"] {
        let res = client
            .post(srv.url("/products"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(format!(r#"{{"name":"Big","price":{raw},"stock":1}}"#))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let text = res.text().await.unwrap();
        assert!(text.contains(&format!(r#""price":{raw}"#)), "{text}");

        let created: serde_json::Value = serde_json::from_str(&text).unwrap();
        let found = reqwest::get(srv.url(&format!("/products/{}", created["id"])))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(found.contains(&format!(r#""price":{raw}"#)), "{found}");
    }
}

#[tokio::test]
async fn array_body_is_rejected_as_malformed() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"[null,"Chair",null,9999,10]"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].is_string());
    assert!(body.get("errors").is_none());

    let listed: Vec<serde_json::Value> = reqwest::get(srv.url("/products"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = res.json().await.unwrap();
    assert!(doc["paths"]["/products/{id}"].is_object());
}
