//! Inventory entities exchanged with the REST API
//!
//! All three entity types are owned by the backend. The client only ever
//! holds the snapshot returned by the last fetch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use validator::Validate;

/// Server-assigned identifier for stores and products
pub type EntityId = i64;

/// Trait for named entities that live under a REST collection.
///
/// Stores and products both have a server-assigned id and a display name;
/// the stock view uses this to resolve ids into names.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "stores", "products")
    fn resource_name() -> &'static str;

    /// Get the server-assigned identifier
    fn id(&self) -> EntityId;

    /// Get the human-readable name
    fn name(&self) -> &str;
}

/// A physical branch or location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: EntityId,
    pub name: String,
    pub city: String,
}

impl Entity for Store {
    fn resource_name() -> &'static str {
        "stores"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A sellable item identified by SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub sku: String,
}

impl Entity for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Payload for `POST /stores`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewStore {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
}

/// Payload for `POST /products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "sku must not be empty"))]
    pub sku: String,
}

/// Composite key of a stock entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub store_id: EntityId,
    pub product_id: EntityId,
}

impl StockKey {
    pub fn new(store_id: EntityId, product_id: EntityId) -> Self {
        Self {
            store_id,
            product_id,
        }
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store {} / product {}", self.store_id, self.product_id)
    }
}

/// Quantity of a product at a store
///
/// Also used as the body of `POST /stock`, which upserts by
/// `(store_id, product_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StockEntry {
    pub store_id: EntityId,
    pub product_id: EntityId,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
}

impl StockEntry {
    pub fn new(key: StockKey, quantity: i64) -> Self {
        Self {
            store_id: key.store_id,
            product_id: key.product_id,
            quantity,
        }
    }

    pub fn key(&self) -> StockKey {
        StockKey::new(self.store_id, self.product_id)
    }
}

/// Optional filters for `GET /stock`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<EntityId>,
}

impl StockQuery {
    /// No filter: every stock entry
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_store(store_id: EntityId) -> Self {
        Self {
            store_id: Some(store_id),
            product_id: None,
        }
    }

    pub fn for_product(product_id: EntityId) -> Self {
        Self {
            store_id: None,
            product_id: Some(product_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store_id.is_none() && self.product_id.is_none()
    }

    /// Check whether an entry passes this filter
    pub fn matches(&self, entry: &StockEntry) -> bool {
        self.store_id.is_none_or(|id| entry.store_id == id)
            && self.product_id.is_none_or(|id| entry.product_id == id)
    }
}

/// Id → name lookup built from a fetched collection
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: HashMap<EntityId, String>,
}

impl NameIndex {
    pub fn from_entities<T: Entity>(entities: &[T]) -> Self {
        Self {
            names: entities
                .iter()
                .map(|e| (e.id(), e.name().to_string()))
                .collect(),
        }
    }

    /// Resolve an id to its display name, or `ID <n>` when unknown
    pub fn display(&self, id: EntityId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("ID {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_query_matches() {
        let entry = StockEntry::new(StockKey::new(1, 2), 5);

        assert!(StockQuery::all().matches(&entry));
        assert!(StockQuery::for_store(1).matches(&entry));
        assert!(!StockQuery::for_store(3).matches(&entry));
        assert!(StockQuery::for_product(2).matches(&entry));
        assert!(
            !StockQuery {
                store_id: Some(1),
                product_id: Some(9),
            }
            .matches(&entry)
        );
    }

    #[test]
    fn test_stock_query_serializes_only_present_filters() {
        let json = serde_json::to_value(StockQuery::for_store(4)).unwrap();
        assert_eq!(json, serde_json::json!({ "store_id": 4 }));
        assert!(StockQuery::all().is_empty());
    }

    #[test]
    fn test_name_index_falls_back_to_raw_id() {
        let stores = vec![Store {
            id: 1,
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        }];
        let index = NameIndex::from_entities(&stores);

        assert_eq!(index.display(1), "Central");
        assert_eq!(index.display(42), "ID 42");
    }

    #[test]
    fn test_payload_validation() {
        let store = NewStore {
            name: String::new(),
            city: "Berlin".to_string(),
        };
        let errors = store.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let entry = StockEntry::new(StockKey::new(1, 1), -1);
        assert!(entry.validate().is_err());
        assert!(StockEntry::new(StockKey::new(1, 1), 0).validate().is_ok());
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Store::resource_name(), "stores");
        assert_eq!(Product::resource_name(), "products");
    }
}
