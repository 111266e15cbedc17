//! Integration tests for the folio API.
//!
//! The relay tests run against a real SMTP transport pointed at a closed
//! port. The MongoDB tests need a reachable server:
//! `MONGO_URL=mongodb://localhost:27017 cargo test --test integration -- --ignored`

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_api::api::{cors_layer, create_router, AppState};
use folio_api::config::SmtpSettings;
use folio_api::locale::Locale;
use folio_api::mail::ContactNotifier;
use folio_api::models::{StatusCheck, CONTACT_COLLECTION, STATUS_COLLECTION};
use folio_api::storage::{self, DocumentStore, InMemoryStore, MongoStore, Projection};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

/// Settings for a relay nobody listens on.
fn unreachable_smtp() -> SmtpSettings {
    SmtpSettings {
        host: "localhost".to_string(),
        port: 1,
        username: "site@example.com".to_string(),
        password: "secret".to_string(),
        sender: "site@example.com".to_string(),
        recipient: "owner@example.com".to_string(),
        timeout_seconds: 5,
    }
}

/// Get a MongoDB store from environment, isolated per test run.
async fn test_store() -> Option<MongoStore> {
    dotenvy::dotenv().ok();

    let url = std::env::var("MONGO_URL").ok()?;
    let db_name = format!("folio_api_test_{}", uuid::Uuid::new_v4().simple());
    MongoStore::connect(&url, &db_name).await.ok()
}

/// Contact submissions succeed and are stored even when the relay is down.
#[tokio::test]
async fn test_contact_stored_when_relay_unreachable() {
    let store = Arc::new(InMemoryStore::new());
    let notifier = ContactNotifier::from_settings(&unreachable_smtp(), Locale::Fr)
        .expect("transport builds without connecting");
    let state = AppState::new(store.clone(), Locale::Fr).with_notifier(notifier);
    let app = create_router(state, cors_layer(&["*".to_string()]).unwrap());

    let body = json!({ "name": "Jane", "email": "jane@example.com", "message": "Hello" });
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.documents(CONTACT_COLLECTION);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get_str("status").unwrap(), "received");
}

/// The notifier reports the transport error to its caller.
#[tokio::test]
async fn test_notifier_reports_unreachable_relay() {
    let notifier = ContactNotifier::from_settings(&unreachable_smtp(), Locale::En).unwrap();
    let contact = folio_api::models::ContactRequest {
        name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
        message: "Hello".to_string(),
    };

    let result = notifier.notify(&contact).await;

    assert!(result.is_err(), "send to a closed port should fail");
}

/// Status checks round-trip through MongoDB without the internal id.
#[tokio::test]
#[ignore = "requires MONGO_URL"]
async fn test_mongo_status_round_trip() {
    let store = match test_store().await {
        Some(s) => s,
        None => {
            println!("Skipping: MONGO_URL not set or invalid");
            return;
        }
    };

    store.ping().await.expect("MongoDB reachable");

    let check = StatusCheck::new("client-1");
    store
        .insert(STATUS_COLLECTION, storage::encode(&check).unwrap())
        .await
        .unwrap();

    let docs = store
        .find_all(STATUS_COLLECTION, &Projection::without_internal_id(), 1000)
        .await
        .unwrap();

    assert_eq!(docs.len(), 1);
    assert!(!docs[0].contains_key("_id"));
    let back: StatusCheck = storage::decode(docs[0].clone()).unwrap();
    assert_eq!(back, check);

    store.close().await;
}

/// Listing honours the limit against a real server.
#[tokio::test]
#[ignore = "requires MONGO_URL"]
async fn test_mongo_find_all_limit() {
    let store = match test_store().await {
        Some(s) => s,
        None => {
            println!("Skipping: MONGO_URL not set or invalid");
            return;
        }
    };

    for i in 0..3 {
        let check = StatusCheck::new(format!("client-{i}"));
        store
            .insert(STATUS_COLLECTION, storage::encode(&check).unwrap())
            .await
            .unwrap();
    }

    let docs = store
        .find_all(STATUS_COLLECTION, &Projection::all(), 2)
        .await
        .unwrap();
    assert_eq!(docs.len(), 2);

    store.close().await;
}
