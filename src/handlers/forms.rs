//! Input forms for the add/set handlers
//!
//! Forms hold raw user text. `parse` turns them into API payloads or a
//! validation error; it never touches the network.

use crate::core::entity::{NewProduct, NewStore, StockEntry};
use crate::core::error::ValidationError;
use crate::core::validation::FormValidator;

/// "Add store" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreForm {
    pub name: String,
    pub city: String,
}

impl StoreForm {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }

    pub fn parse(&self) -> Result<NewStore, ValidationError> {
        let mut v = FormValidator::new();
        let name = v.text("name", &self.name);
        let city = v.text("city", &self.city);
        v.finish()?;
        Ok(NewStore { name, city })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// "Add product" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
}

impl ProductForm {
    pub fn new(name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
        }
    }

    pub fn parse(&self) -> Result<NewProduct, ValidationError> {
        let mut v = FormValidator::new();
        let name = v.text("name", &self.name);
        let sku = v.text("sku", &self.sku);
        v.finish()?;
        Ok(NewProduct { name, sku })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// "Set stock" form; ids and quantity are typed as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockForm {
    pub store_id: String,
    pub product_id: String,
    pub quantity: String,
}

impl StockForm {
    pub fn new(
        store_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            product_id: product_id.into(),
            quantity: quantity.into(),
        }
    }

    pub fn parse(&self) -> Result<StockEntry, ValidationError> {
        let mut v = FormValidator::new();
        let store_id = v.integer("store_id", &self.store_id);
        let product_id = v.integer("product_id", &self.product_id);
        let quantity = v.quantity("quantity", &self.quantity);
        v.finish()?;

        match (store_id, product_id, quantity) {
            (Some(store_id), Some(product_id), Some(quantity)) => Ok(StockEntry {
                store_id,
                product_id,
                quantity,
            }),
            // finish() already failed for any missing value
            _ => Err(ValidationError::field("stock", "incomplete form")),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
