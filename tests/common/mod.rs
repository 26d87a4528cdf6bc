#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use flatout_server::{
    app,
    error::StoreError,
    models::{
        location::Location,
        movement::{FieldUpdate, Movement},
    },
    store::{
        LocationStore, MovementStore, SharedLocationStore, SharedMovementStore,
        memory::{MemoryLocationStore, MemoryMovementStore},
    },
};

pub struct TestApp {
    pub router: Router,
    pub movements: Arc<MemoryMovementStore>,
    pub locations: Arc<MemoryLocationStore>,
}

pub fn test_app() -> TestApp {
    let movements = Arc::new(MemoryMovementStore::new());
    let locations = Arc::new(MemoryLocationStore::new());
    let router = app(
        movements.clone() as SharedMovementStore,
        locations.clone() as SharedLocationStore,
    );

    TestApp {
        router,
        movements,
        locations,
    }
}

/// App whose stores fail every call.
pub fn failing_app() -> Router {
    let store = Arc::new(FailingStore);
    app(
        store.clone() as SharedMovementStore,
        store as SharedLocationStore,
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {:?}", e, self.text))
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {}", name))
            .to_str()
            .unwrap()
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let raw = body.map(|value| value.to_string()).unwrap_or_default();
    send_raw(router, method, uri, &raw).await
}

pub async fn send_raw(router: &Router, method: &str, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub fn assert_cors(response: &TestResponse, allow_headers: &str, allow_methods: &str) {
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("access-control-allow-headers"), allow_headers);
    assert_eq!(response.header("access-control-allow-methods"), allow_methods);
    assert_eq!(response.header("content-type"), "application/json");
}

pub fn assert_movement_cors(response: &TestResponse) {
    assert_cors(
        response,
        "Content-Type,Authorization",
        "GET,POST,PUT,DELETE,OPTIONS",
    );
}

pub fn assert_location_cors(response: &TestResponse) {
    assert_cors(response, "Content-Type", "GET,POST,OPTIONS");
}

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

pub struct FailingStore;

#[async_trait]
impl MovementStore for FailingStore {
    async fn scan(&self) -> Result<Vec<Movement>, StoreError> {
        Err(unavailable())
    }

    async fn get(&self, _id: &str) -> Result<Option<Movement>, StoreError> {
        Err(unavailable())
    }

    async fn put(&self, _movement: &Movement) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: &str, _updates: &[FieldUpdate]) -> Result<Movement, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

#[async_trait]
impl LocationStore for FailingStore {
    async fn scan(&self) -> Result<Vec<Location>, StoreError> {
        Err(unavailable())
    }

    async fn put(&self, _location: &Location) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
