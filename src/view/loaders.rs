//! Collection loaders
//!
//! Each loader fetches a full collection and builds a fresh [`Table`] from
//! it. The stock loader also fetches stores and products (concurrently) to
//! show names instead of raw ids.

use crate::core::entity::{NameIndex, Product, StockEntry, StockQuery, Store};
use crate::core::error::ClientResult;
use crate::core::service::InventoryApi;
use crate::view::table::Table;

pub const STORES_PLACEHOLDER: &str = "No stores";
pub const PRODUCTS_PLACEHOLDER: &str = "No products";
pub const STOCK_PLACEHOLDER: &str = "No stock entries";

pub fn stores_table(stores: &[Store]) -> Table {
    let mut table = Table::new("Stores", &["ID", "Name", "City"], STORES_PLACEHOLDER);
    for store in stores {
        table.push_row(vec![
            store.id.to_string(),
            store.name.clone(),
            store.city.clone(),
        ]);
    }
    table
}

pub fn products_table(products: &[Product]) -> Table {
    let mut table = Table::new("Products", &["ID", "Name", "SKU"], PRODUCTS_PLACEHOLDER);
    for product in products {
        table.push_row(vec![
            product.id.to_string(),
            product.name.clone(),
            product.sku.clone(),
        ]);
    }
    table
}

/// Join stock entries against stores and products
///
/// Unknown ids fall back to `ID <n>`.
pub fn stock_table(stock: &[StockEntry], stores: &[Store], products: &[Product]) -> Table {
    let store_names = NameIndex::from_entities(stores);
    let product_names = NameIndex::from_entities(products);

    let mut table = Table::new("Stock", &["Store", "Product", "Quantity"], STOCK_PLACEHOLDER);
    for entry in stock {
        table.push_row(vec![
            store_names.display(entry.store_id),
            product_names.display(entry.product_id),
            entry.quantity.to_string(),
        ]);
    }
    table
}

pub async fn load_stores<A: InventoryApi + ?Sized>(api: &A) -> ClientResult<Table> {
    let stores = api.list_stores().await?;
    tracing::debug!(count = stores.len(), "Loaded stores");
    Ok(stores_table(&stores))
}

pub async fn load_products<A: InventoryApi + ?Sized>(api: &A) -> ClientResult<Table> {
    let products = api.list_products().await?;
    tracing::debug!(count = products.len(), "Loaded products");
    Ok(products_table(&products))
}

/// Fetch stock, stores and products together, then join
///
/// Arrival order does not matter: all three results are complete before the
/// join runs. Any one failure fails the whole load.
pub async fn load_stock<A: InventoryApi + ?Sized>(
    api: &A,
    query: StockQuery,
) -> ClientResult<Table> {
    let (stock, stores, products) = futures::try_join!(
        api.list_stock(query),
        api.list_stores(),
        api.list_products()
    )?;
    tracing::debug!(count = stock.len(), "Loaded stock");
    Ok(stock_table(&stock, &stores, &products))
}
