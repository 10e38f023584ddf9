//! End-to-end tests for the `/items` REST surface.
//!
//! Each test starts the full application on an ephemeral port against the
//! in-memory store and talks to it over HTTP.

#![allow(clippy::panic)]

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use shopping_list_api::api;
use shopping_list_api::app_state::AppState;
use shopping_list_api::persistence::{ItemStore, MemoryItemStore};
use shopping_list_api::service::ItemService;

const FRONTEND: &str = "http://localhost:4321";

struct TestApp {
    base: String,
    client: Client,
    store: Arc<MemoryItemStore>,
}

impl TestApp {
    async fn spawn() -> Self {
        let store = Arc::new(MemoryItemStore::new());
        let handle: Arc<dyn ItemStore> = Arc::clone(&store) as Arc<dyn ItemStore>;
        let state = AppState::new(ItemService::new(handle));
        let Ok(cors) = api::cors_layer(FRONTEND) else {
            panic!("frontend origin should be a valid header");
        };
        let app = api::build_app(state, cors);

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            client: Client::new(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (StatusCode, Value) {
        let Ok(response) = request.send().await else {
            panic!("request failed");
        };
        let status = response.status();
        let Ok(text) = response.text().await else {
            panic!("body unreadable");
        };
        if text.is_empty() {
            return (status, Value::Null);
        }
        let Ok(json) = serde_json::from_str(&text) else {
            panic!("body is not JSON: {text}");
        };
        (status, json)
    }

    async fn create(&self, body: Value) -> (StatusCode, Value) {
        self.send(self.client.post(self.url("/items")).json(&body))
            .await
    }

    async fn create_named(&self, name: &str) -> Value {
        let (status, body) = self.create(json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    async fn update(&self, id: &str, body: Value) -> (StatusCode, Value) {
        self.send(self.client.put(self.url(&format!("/items/{id}"))).json(&body))
            .await
    }

    async fn delete(&self, id: &str) -> (StatusCode, Value) {
        self.send(self.client.delete(self.url(&format!("/items/{id}"))))
            .await
    }

    async fn list(&self) -> Vec<Value> {
        let (status, body) = self.send(self.client.get(self.url("/items"))).await;
        assert_eq!(status, StatusCode::OK);
        let Value::Array(items) = body else {
            panic!("list should return an array, got {body}");
        };
        items
    }
}

fn id_of(item: &Value) -> String {
    let Some(id) = item.get("id").and_then(Value::as_str) else {
        panic!("item has no string id: {item}");
    };
    id.to_string()
}

fn error_of(body: &Value) -> &str {
    let Some(msg) = body.get("error").and_then(Value::as_str) else {
        panic!("body has no error string: {body}");
    };
    msg
}

#[tokio::test]
async fn created_item_is_listed_first() {
    let app = TestApp::spawn().await;
    app.create_named("bread").await;

    let created = app.create_named("milk").await;
    assert_eq!(created.get("name"), Some(&json!("milk")));
    assert_eq!(created.get("bought"), Some(&json!(false)));
    assert!(!id_of(&created).is_empty());
    assert!(created.get("createdAt").is_some());

    let items = app.list().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items.first(), Some(&created));
}

#[tokio::test]
async fn create_rejects_missing_or_empty_name() {
    let app = TestApp::spawn().await;

    for body in [
        json!({}),
        json!({ "name": "" }),
        json!({ "name": "   " }),
        json!({ "name": null }),
        json!({ "name": 7 }),
    ] {
        let (status, resp) = app.create(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&resp), "Item name is required.");
    }

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let request = app
        .client
        .post(app.url("/items"))
        .header("content-type", "application/json")
        .body("{\"name\": ");
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_of(&body).is_empty());
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn toggling_twice_restores_bought() {
    let app = TestApp::spawn().await;
    let created = app.create_named("eggs").await;
    let id = id_of(&created);

    let (status, body) = app.update(&id, json!({ "bought": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Item updated." }));

    let after_first = app.list().await;
    assert_eq!(
        after_first.first().and_then(|i| i.get("bought")),
        Some(&json!(true))
    );

    let (status, _) = app.update(&id, json!({ "bought": false })).await;
    assert_eq!(status, StatusCode::OK);

    let items = app.list().await;
    assert_eq!(items.first(), Some(&created));
}

#[tokio::test]
async fn update_ignores_unknown_fields() {
    let app = TestApp::spawn().await;
    let created = app.create_named("tea").await;
    let id = id_of(&created);

    let (status, _) = app
        .update(&id, json!({ "bought": true, "name": "coffee", "id": "x" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let items = app.list().await;
    let Some(item) = items.first() else {
        panic!("item should exist");
    };
    assert_eq!(item.get("name"), Some(&json!("tea")));
    assert_eq!(id_of(item), id);
}

#[tokio::test]
async fn non_boolean_bought_is_rejected() {
    let app = TestApp::spawn().await;
    let created = app.create_named("rice").await;
    let id = id_of(&created);

    for body in [json!({ "bought": "true" }), json!({ "bought": 1 }), json!({})] {
        let (status, resp) = app.update(&id, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&resp), "'bought' must be a boolean.");
    }

    let items = app.list().await;
    assert_eq!(items.first(), Some(&created));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = TestApp::spawn().await;
    let missing = "9b2f4a64-2b43-4d2e-9f8e-3c1d0f6b7a11";

    for id in [missing, "not-an-id", "507f1f77bcf86cd799439011", "%FF", "ab%C3%28cd"] {
        let (status, body) = app.update(id, json!({ "bought": true })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_of(&body), "Item not found.");

        let (status, body) = app.delete(id).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_of(&body), "Item not found.");
    }
}

#[tokio::test]
async fn non_object_bodies_are_rejected() {
    let app = TestApp::spawn().await;

    for body in [json!(["milk"]), json!("milk"), json!(null)] {
        let (status, resp) = app.create(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&resp), "Request body must be a JSON object.");
    }
    assert!(app.store.is_empty().await);

    let created = app.create_named("oats").await;
    let (status, resp) = app.update(&id_of(&created), json!([true])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&resp), "Request body must be a JSON object.");

    let items = app.list().await;
    assert_eq!(items.first(), Some(&created));
}

#[tokio::test]
async fn delete_removes_item() {
    let app = TestApp::spawn().await;
    let keep = app.create_named("apples").await;
    let gone = app.create_named("pears").await;

    let (status, body) = app.delete(&id_of(&gone)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let items = app.list().await;
    assert_eq!(items, vec![keep]);

    let (status, _) = app.delete(&id_of(&gone)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = TestApp::spawn().await;
    let t1 = app.create_named("t1").await;
    let t2 = app.create_named("t2").await;
    let t3 = app.create_named("t3").await;

    let ids: Vec<String> = app.list().await.iter().map(id_of).collect();
    assert_eq!(ids, vec![id_of(&t3), id_of(&t2), id_of(&t1)]);
}

#[tokio::test]
async fn unmatched_routes_return_json_404() {
    let app = TestApp::spawn().await;

    let (status, body) = app.send(app.client.get(app.url("/nope"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found." }));

    let (status, body) = app.send(app.client.patch(app.url("/items"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found." }));
}

#[tokio::test]
async fn store_failure_is_a_generic_500() {
    let app = TestApp::spawn().await;
    app.store.close().await;

    let (status, body) = app.send(app.client.get(app.url("/items"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error." }));

    let (status, body) = app.create(json!({ "name": "milk" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error." }));
}

#[tokio::test]
async fn health_reports_store_status() {
    let app = TestApp::spawn().await;

    let (status, body) = app.send(app.client.get(app.url("/health"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("store"), Some(&json!("up")));
    assert_eq!(body.get("status"), Some(&json!("healthy")));

    app.store.close().await;
    let (status, body) = app.send(app.client.get(app.url("/health"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.get("store"), Some(&json!("down")));
    assert_eq!(body.get("status"), Some(&json!("degraded")));
}

#[tokio::test]
async fn cors_allows_only_the_frontend_origin() {
    let app = TestApp::spawn().await;

    let Ok(allowed) = app
        .client
        .get(app.url("/items"))
        .header("origin", FRONTEND)
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(FRONTEND)
    );

    let Ok(other) = app
        .client
        .get(app.url("/items"))
        .header("origin", "http://evil.example")
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .send(app.client.get(app.url(api::OPENAPI_PATH)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("paths").and_then(|p| p.get("/items")).is_some());
}
