//! In-memory implementation of InventoryApi for testing and development
//!
//! Mirrors the REST contract of the inventory backend: sequential ids starting
//! at 1, upsert keyed by `(store_id, product_id)`, 400 when a stock entry
//! references an unknown store or product, 404 when deleting something that
//! is not there, and `clear` resetting the id counters.

use crate::core::entity::{
    EntityId, NewProduct, NewStore, Product, StockEntry, StockKey, StockQuery, Store,
};
use crate::core::error::{ClientError, ClientResult};
use crate::core::service::InventoryApi;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Inventory {
    stores: Vec<Store>,
    products: Vec<Product>,
    stock: Vec<StockEntry>,
    next_store_id: EntityId,
    next_product_id: EntityId,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            stores: Vec::new(),
            products: Vec::new(),
            stock: Vec::new(),
            next_store_id: 1,
            next_product_id: 1,
        }
    }
}

/// In-memory inventory service
///
/// Uses RwLock for thread-safe access, so one instance can back both the
/// HTTP mock server in integration tests and direct calls.
#[derive(Debug, Clone)]
pub struct InMemoryInventory {
    inner: Arc<RwLock<Inventory>>,
    cascade_deletes: bool,
}

impl InMemoryInventory {
    /// Create an empty inventory whose store/product deletes cascade to stock
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inventory::default())),
            cascade_deletes: true,
        }
    }

    /// Toggle whether deleting a store or product removes its stock entries
    pub fn with_cascade(mut self, cascade_deletes: bool) -> Self {
        self.cascade_deletes = cascade_deletes;
        self
    }

    fn read(&self) -> ClientResult<RwLockReadGuard<'_, Inventory>> {
        self.inner
            .read()
            .map_err(|e| internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ClientResult<RwLockWriteGuard<'_, Inventory>> {
        self.inner
            .write()
            .map_err(|e| internal(format!("Failed to acquire write lock: {}", e)))
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

fn internal(message: String) -> ClientError {
    ClientError::Status {
        status: 500,
        message,
    }
}

fn bad_request(message: &str) -> ClientError {
    ClientError::Status {
        status: 400,
        message: message.to_string(),
    }
}

fn not_found(message: &str) -> ClientError {
    ClientError::Status {
        status: 404,
        message: message.to_string(),
    }
}

#[async_trait]
impl InventoryApi for InMemoryInventory {
    async fn health(&self) -> ClientResult<bool> {
        self.read().map(|_| true)
    }

    async fn list_stores(&self) -> ClientResult<Vec<Store>> {
        Ok(self.read()?.stores.clone())
    }

    async fn create_store(&self, store: NewStore) -> ClientResult<Store> {
        let mut inv = self.write()?;
        let created = Store {
            id: inv.next_store_id,
            name: store.name,
            city: store.city,
        };
        inv.next_store_id += 1;
        inv.stores.push(created.clone());
        Ok(created)
    }

    async fn delete_store(&self, id: EntityId) -> ClientResult<()> {
        let mut inv = self.write()?;
        let before = inv.stores.len();
        inv.stores.retain(|s| s.id != id);
        if inv.stores.len() == before {
            return Err(not_found("Store not found"));
        }
        if self.cascade_deletes {
            inv.stock.retain(|e| e.store_id != id);
        }
        Ok(())
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.read()?.products.clone())
    }

    async fn create_product(&self, product: NewProduct) -> ClientResult<Product> {
        let mut inv = self.write()?;
        let created = Product {
            id: inv.next_product_id,
            name: product.name,
            sku: product.sku,
        };
        inv.next_product_id += 1;
        inv.products.push(created.clone());
        Ok(created)
    }

    async fn delete_product(&self, id: EntityId) -> ClientResult<()> {
        let mut inv = self.write()?;
        let before = inv.products.len();
        inv.products.retain(|p| p.id != id);
        if inv.products.len() == before {
            return Err(not_found("Product not found"));
        }
        if self.cascade_deletes {
            inv.stock.retain(|e| e.product_id != id);
        }
        Ok(())
    }

    async fn list_stock(&self, query: StockQuery) -> ClientResult<Vec<StockEntry>> {
        Ok(self
            .read()?
            .stock
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect())
    }

    async fn upsert_stock(&self, entry: StockEntry) -> ClientResult<StockEntry> {
        let mut inv = self.write()?;

        if !inv.stores.iter().any(|s| s.id == entry.store_id) {
            return Err(bad_request("Store not found"));
        }
        if !inv.products.iter().any(|p| p.id == entry.product_id) {
            return Err(bad_request("Product not found"));
        }

        let key = entry.key();
        if let Some(existing) = inv.stock.iter_mut().find(|e| e.key() == key) {
            existing.quantity = entry.quantity;
            return Ok(existing.clone());
        }

        inv.stock.push(entry.clone());
        Ok(entry)
    }

    async fn delete_stock(&self, key: StockKey) -> ClientResult<()> {
        let mut inv = self.write()?;
        let position = inv
            .stock
            .iter()
            .position(|e| e.key() == key)
            .ok_or_else(|| not_found("Stock item not found"))?;
        inv.stock.remove(position);
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.write()? = Inventory::default();
        Ok(())
    }
}
