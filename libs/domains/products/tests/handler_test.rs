//! Handler tests for Products domain
//!
//! These drive the products router end to end over the in-memory repository:
//! - Request parsing and validation order
//! - HTTP status codes
//! - Error envelope (`code`, `error`, `message`)

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed(app: &Router, names: &[&str]) {
    for (i, name) in names.iter().enumerate() {
        let (status, _) = send(
            app,
            "POST",
            "/",
            Some(json!({ "name": name, "price": i as f64 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app();

    let widget = json!({"name": "Widget", "price": 10});
    let (status, created) = send(&app, "POST", "/", Some(widget)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["price"], 10.0);
    assert!(created["description"].is_null());
    assert!(created["imageName"].is_null());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let (status, conflict) =
        send(&app, "POST", "/", Some(json!({"name": "Widget", "price": 20}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(conflict["error"], "CONFLICT");
    assert_eq!(conflict["message"], "Product with name 'Widget' already exists");

    let (status, fetched) = send(&app, "GET", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], 10.0);

    let (status, updated) = send(&app, "PATCH", "/1", Some(json!({"price": 15}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 15.0);
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, deleted) = send(&app, "DELETE", "/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], 1);
    assert_eq!(deleted["price"], 15.0);

    let (status, missing) = send(&app, "GET", "/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_returns_all_input_fields() {
    let app = app();

    let (status, product) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "Gadget",
            "description": "A handy gadget",
            "price": 99.5,
            "imageName": "gadget.png"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["description"], "A handy gadget");
    assert_eq!(product["imageName"], "gadget.png");
    assert_eq!(product["price"], 99.5);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();

    let cases = [
        json!({"name": "ab", "price": 10}),
        json!({"name": "a".repeat(256), "price": 10}),
        json!({"name": "", "price": 10}),
        json!({"price": 10}),
        json!({"name": "Widget", "price": -1}),
        json!({"name": "Widget", "price": 1_000_001}),
        json!({"name": "Widget"}),
        json!({"name": "Widget", "price": "ten"}),
        json!({"name": "Widget", "price": 10, "imageName": "ab"}),
    ];

    for body in cases {
        let (status, error) = send(&app, "POST", "/", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {}", body);
        assert_eq!(error["error"], "VALIDATION_ERROR", "{}", body);
        assert_eq!(error["code"], 1001);
    }

    let (_, count) = send(&app, "GET", "/count", None).await;
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_validation_message_is_aggregated() {
    let app = app();

    let body = json!({"name": "ab", "price": -5});
    let (status, error) = send(&app, "POST", "/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let message = error["message"].as_str().unwrap();
    assert!(message.contains("at \"name\""), "{}", message);
    assert!(message.contains("at \"price\""), "{}", message);
}

#[tokio::test]
async fn test_duplicate_name_checked_after_validation() {
    let app = app();
    seed(&app, &["Widget"]).await;

    // Invalid price wins over the duplicate name
    let body = json!({"name": "Widget", "price": -1});
    let (status, error) = send(&app, "POST", "/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = app();
    seed(&app, &["Widget"]).await;

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(json!({"price": 1}))),
        ("DELETE", None),
    ] {
        let (status, error) = send(&app, method, "/abc", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(error["error"], "INVALID_ID");
        assert_eq!(
            error["message"],
            "Invalid ID format. Please provide a valid number."
        );
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    seed(&app, &["Widget"]).await;

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(json!({"price": 1}))),
        ("DELETE", None),
    ] {
        let (status, error) = send(&app, method, "/999", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        assert_eq!(error["code"], 1004);
    }

    let (_, count) = send(&app, "GET", "/count", None).await;
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_update_checks_body_before_id() {
    let app = app();

    // Both the body and the id are bad: the body is reported
    let (status, error) = send(&app, "PATCH", "/abc", Some(json!({"price": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "VALIDATION_ERROR");

    // Valid body, bad id
    let (_, error) = send(&app, "PATCH", "/abc", Some(json!({"price": 1}))).await;
    assert_eq!(error["error"], "INVALID_ID");

    // Valid body and id, no such product
    let (status, _) = send(&app, "PATCH", "/5", Some(json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_explicit_null_is_validation_error() {
    let app = app();

    let body = json!({"name": "Widget", "price": 10, "description": null});
    let (status, error) = send(&app, "POST", "/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert!(
        error["message"].as_str().unwrap().contains("found null"),
        "{}",
        error["message"]
    );

    seed(&app, &["Gadget"]).await;
    let (status, error) = send(&app, "PATCH", "/1", Some(json!({"price": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "VALIDATION_ERROR");

    // Nothing was written by the rejected patch
    let (_, product) = send(&app, "GET", "/1", None).await;
    assert_eq!(product["price"], 0.0);
}

#[tokio::test]
async fn test_update_merges_and_advances_timestamp() {
    let app = app();
    seed(&app, &["Widget"]).await;

    let (_, first) = send(&app, "PATCH", "/1", Some(json!({"price": 15}))).await;
    let (status, second) = send(&app, "PATCH", "/1", Some(json!({"price": 15}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["price"], second["price"]);
    assert_eq!(first["name"], second["name"]);

    let timestamp = |product: &Value| -> chrono::DateTime<chrono::Utc> {
        serde_json::from_value(product["updatedAt"].clone()).unwrap()
    };
    let (t1, t2) = (timestamp(&first), timestamp(&second));
    assert!(t2 >= t1);

    let (status, _) = send(&app, "PATCH", "/1", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = app();
    seed(&app, &["alpha", "bravo", "charlie", "delta", "echo"]).await;

    let (status, all) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&all), [1, 2, 3, 4, 5]);

    let (_, taken) = send(&app, "GET", "/?take=2", None).await;
    assert_eq!(ids(&taken), [1, 2]);

    let (_, window) = send(&app, "GET", "/?skip=1&take=2", None).await;
    assert_eq!(ids(&window), [2, 3]);

    let (_, from_zero) = send(&app, "GET", "/?skip=0&take=1", None).await;
    assert_eq!(ids(&from_zero), [1]);

    let (_, skipped) = send(&app, "GET", "/?skip=3", None).await;
    assert_eq!(ids(&skipped), [4, 5]);

    let (_, past_end) = send(&app, "GET", "/?skip=10", None).await;
    assert!(ids(&past_end).is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let app = app();

    for uri in ["/?take=0", "/?take=101", "/?skip=-1", "/?skip=abc", "/?take=1.5"] {
        let (status, error) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(error["error"], "VALIDATION_ERROR", "{}", uri);
    }
}

#[tokio::test]
async fn test_count_products() {
    let app = app();

    let (status, count) = send(&app, "GET", "/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, 0);

    seed(&app, &["alpha", "bravo"]).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/count").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let count: u64 = json_body(response.into_body()).await;
    assert_eq!(count, 2);
}

#[test]
fn test_openapi_documents_duplicate_name_on_create() {
    use utoipa::OpenApi;

    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    let create = doc["paths"]
        .as_object()
        .unwrap()
        .values()
        .find_map(|item| item.get("post"))
        .unwrap();
    let bad_request = create["responses"]["400"].to_string();
    assert!(
        bad_request.contains("BadRequestConflictResponse"),
        "{}",
        bad_request
    );

    let examples = &doc["components"]["responses"]["BadRequestConflictResponse"]["content"]
        ["application/json"]["examples"];
    assert_eq!(examples["Duplicate"]["value"]["error"], "CONFLICT");
    assert_eq!(examples["Validation"]["value"]["error"], "VALIDATION_ERROR");
}
