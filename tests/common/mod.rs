//! Mock inventory backend shared by the integration tests
//!
//! Serves the REST contract over a real socket on `127.0.0.1:0`, backed by
//! `InMemoryInventory`, so the HTTP client is exercised end to end.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use stockroom::client::HttpInventoryClient;
use stockroom::config::ApiConfig;
use stockroom::core::{
    ClientError, ClientResult, EntityId, InventoryApi, NewProduct, NewStore, StockEntry, StockKey,
    StockQuery,
};
use stockroom::storage::InMemoryInventory;
use tokio::net::TcpListener;

/// Backend state: the inventory plus a count of requests served
#[derive(Clone, Default)]
pub struct MockBackend {
    pub inventory: InMemoryInventory,
    hits: Arc<AtomicUsize>,
    products_down: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new(inventory: InMemoryInventory) -> Self {
        Self {
            inventory,
            hits: Arc::new(AtomicUsize::new(0)),
            products_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make `GET /products` answer 500 until switched back
    pub fn set_products_down(&self, down: bool) {
        self.products_down.store(down, Ordering::SeqCst);
    }

    /// Number of requests that reached the backend
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Router implementing the inventory REST endpoints
pub fn inventory_router(backend: MockBackend) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stores", get(list_stores).post(create_store))
        .route("/stores/{id}", delete(delete_store))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", delete(delete_product))
        .route(
            "/stock",
            get(list_stock).post(upsert_stock).delete(delete_stock),
        )
        .route("/clear", post(clear))
        .with_state(backend)
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Spawn a fresh backend and a client pointed at it
pub async fn start() -> (MockBackend, HttpInventoryClient) {
    start_with(InMemoryInventory::new()).await
}

pub async fn start_with(inventory: InMemoryInventory) -> (MockBackend, HttpInventoryClient) {
    let backend = MockBackend::new(inventory);
    let base_url = spawn(inventory_router(backend.clone())).await;
    (backend, client_for(&base_url))
}

pub fn client_for(base_url: &str) -> HttpInventoryClient {
    HttpInventoryClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    })
    .unwrap()
}

// =============================================================================
// Responses
// =============================================================================

fn respond<T: Serialize>(ok: StatusCode, result: ClientResult<T>) -> Response {
    match result {
        Ok(body) => (ok, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ClientError) -> Response {
    let status = err
        .status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "detail": err.to_string() }))).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

async fn health(State(backend): State<MockBackend>) -> Json<serde_json::Value> {
    backend.hit();
    Json(json!({ "status": "ok" }))
}

async fn list_stores(State(backend): State<MockBackend>) -> Response {
    backend.hit();
    respond(StatusCode::OK, backend.inventory.list_stores().await)
}

async fn create_store(
    State(backend): State<MockBackend>,
    Json(store): Json<NewStore>,
) -> Response {
    backend.hit();
    respond(StatusCode::CREATED, backend.inventory.create_store(store).await)
}

async fn delete_store(State(backend): State<MockBackend>, Path(id): Path<EntityId>) -> Response {
    backend.hit();
    match backend.inventory.delete_store(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn list_products(State(backend): State<MockBackend>) -> Response {
    backend.hit();
    if backend.products_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Products unavailable" })),
        )
            .into_response();
    }
    respond(StatusCode::OK, backend.inventory.list_products().await)
}

async fn create_product(
    State(backend): State<MockBackend>,
    Json(product): Json<NewProduct>,
) -> Response {
    backend.hit();
    respond(StatusCode::CREATED, backend.inventory.create_product(product).await)
}

async fn delete_product(State(backend): State<MockBackend>, Path(id): Path<EntityId>) -> Response {
    backend.hit();
    match backend.inventory.delete_product(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn list_stock(
    State(backend): State<MockBackend>,
    Query(query): Query<StockQuery>,
) -> Response {
    backend.hit();
    respond(StatusCode::OK, backend.inventory.list_stock(query).await)
}

async fn upsert_stock(
    State(backend): State<MockBackend>,
    Json(entry): Json<StockEntry>,
) -> Response {
    backend.hit();
    respond(StatusCode::OK, backend.inventory.upsert_stock(entry).await)
}

async fn delete_stock(
    State(backend): State<MockBackend>,
    Query(query): Query<StockQuery>,
) -> Response {
    backend.hit();
    let (Some(store_id), Some(product_id)) = (query.store_id, query.product_id) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "msg": "Field required" }] })),
        )
            .into_response();
    };
    match backend
        .inventory
        .delete_stock(StockKey::new(store_id, product_id))
        .await
    {
        Ok(()) => Json(json!({ "message": "Stock item deleted" })).into_response(),
        Err(err) => error_response(err),
    }
}

async fn clear(State(backend): State<MockBackend>) -> Response {
    backend.hit();
    match backend.inventory.clear().await {
        Ok(()) => Json(json!({ "message": "All data cleared" })).into_response(),
        Err(err) => error_response(err),
    }
}
