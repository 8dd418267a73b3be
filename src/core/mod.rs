//! Core module containing the inventory types, errors and the API trait

pub mod entity;
pub mod error;
pub mod service;
pub mod validation;

pub use entity::{
    Entity, EntityId, NameIndex, NewProduct, NewStore, Product, StockEntry, StockKey, StockQuery,
    Store,
};
pub use error::{ClientError, ClientResult, ConfigError, FieldValidationError, ValidationError};
pub use service::InventoryApi;
pub use validation::FormValidator;
