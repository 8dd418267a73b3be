//! Service trait for the inventory REST API

use crate::core::entity::{
    EntityId, NewProduct, NewStore, Product, StockEntry, StockKey, StockQuery, Store,
};
use crate::core::error::ClientResult;
use async_trait::async_trait;

/// Operations exposed by the inventory backend
///
/// The HTTP client is the production implementation; the in-memory double
/// implements the same contract for tests and offline use. Loaders and
/// mutation handlers only ever see this trait.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ClientResult<bool>;

    /// `GET /stores`
    async fn list_stores(&self) -> ClientResult<Vec<Store>>;

    /// `POST /stores`
    async fn create_store(&self, store: NewStore) -> ClientResult<Store>;

    /// `DELETE /stores/{id}`
    async fn delete_store(&self, id: EntityId) -> ClientResult<()>;

    /// `GET /products`
    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    /// `POST /products`
    async fn create_product(&self, product: NewProduct) -> ClientResult<Product>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: EntityId) -> ClientResult<()>;

    /// `GET /stock`, optionally filtered by store and/or product
    async fn list_stock(&self, query: StockQuery) -> ClientResult<Vec<StockEntry>>;

    /// `POST /stock`
    ///
    /// Create-or-update keyed by `(store_id, product_id)`: a second upsert
    /// for the same key overwrites the quantity.
    async fn upsert_stock(&self, entry: StockEntry) -> ClientResult<StockEntry>;

    /// `DELETE /stock?store_id=&product_id=`
    async fn delete_stock(&self, key: StockKey) -> ClientResult<()>;

    /// `POST /clear`, wiping every collection
    async fn clear(&self) -> ClientResult<()>;
}
