//! HTTP implementation of the inventory API

pub mod transport;

pub use transport::HttpTransport;

use crate::config::ApiConfig;
use crate::core::entity::{
    Entity, EntityId, NewProduct, NewStore, Product, StockEntry, StockKey, StockQuery, Store,
};
use crate::core::error::ClientResult;
use crate::core::service::InventoryApi;
use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Inventory API client speaking to the REST backend
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    transport: HttpTransport,
}

impl HttpInventoryClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

fn collection_path<E: Entity>() -> String {
    format!("/{}", E::resource_name())
}

fn member_path<E: Entity>(id: EntityId) -> String {
    format!("/{}/{}", E::resource_name(), id)
}

fn stock_query_pairs(query: &StockQuery) -> Vec<(&'static str, i64)> {
    let mut pairs = Vec::with_capacity(2);
    if let Some(store_id) = query.store_id {
        pairs.push(("store_id", store_id));
    }
    if let Some(product_id) = query.product_id {
        pairs.push(("product_id", product_id));
    }
    pairs
}

#[async_trait]
impl InventoryApi for HttpInventoryClient {
    async fn health(&self) -> ClientResult<bool> {
        let health: HealthResponse = self.transport.get("/health", &[]).await?;
        Ok(health.status == "ok")
    }

    async fn list_stores(&self) -> ClientResult<Vec<Store>> {
        self.transport.get(&collection_path::<Store>(), &[]).await
    }

    async fn create_store(&self, store: NewStore) -> ClientResult<Store> {
        store.validate()?;
        self.transport.post(&collection_path::<Store>(), &store).await
    }

    async fn delete_store(&self, id: EntityId) -> ClientResult<()> {
        self.transport.delete(&member_path::<Store>(id), &[]).await
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.transport.get(&collection_path::<Product>(), &[]).await
    }

    async fn create_product(&self, product: NewProduct) -> ClientResult<Product> {
        product.validate()?;
        self.transport.post(&collection_path::<Product>(), &product).await
    }

    async fn delete_product(&self, id: EntityId) -> ClientResult<()> {
        self.transport.delete(&member_path::<Product>(id), &[]).await
    }

    async fn list_stock(&self, query: StockQuery) -> ClientResult<Vec<StockEntry>> {
        self.transport
            .get("/stock", &stock_query_pairs(&query))
            .await
    }

    async fn upsert_stock(&self, entry: StockEntry) -> ClientResult<StockEntry> {
        entry.validate()?;
        self.transport.post("/stock", &entry).await
    }

    async fn delete_stock(&self, key: StockKey) -> ClientResult<()> {
        let query = StockQuery {
            store_id: Some(key.store_id),
            product_id: Some(key.product_id),
        };
        self.transport
            .delete("/stock", &stock_query_pairs(&query))
            .await
    }

    async fn clear(&self) -> ClientResult<()> {
        self.transport.post_empty("/clear").await
    }
}
