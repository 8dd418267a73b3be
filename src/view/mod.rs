//! View state: the last rendered snapshot of every collection
//!
//! Loaders produce new tables; [`ViewState`] only ever swaps a whole table
//! for a newer one. A failed load leaves the previous snapshot in place.

pub mod loaders;
pub mod table;

pub use table::Table;

use crate::core::entity::StockQuery;
use std::fmt;

/// Which collection a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Stores,
    Products,
    Stock,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Stores, ViewKind::Products, ViewKind::Stock];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Stores => "stores",
            ViewKind::Products => "products",
            ViewKind::Stock => "stock",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshots of the three collection views
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    stores: Option<Table>,
    products: Option<Table>,
    stock: Option<Table>,
    /// Filter applied when the stock view reloads
    pub stock_filter: StockQuery,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ViewKind) -> Option<&Table> {
        match kind {
            ViewKind::Stores => self.stores.as_ref(),
            ViewKind::Products => self.products.as_ref(),
            ViewKind::Stock => self.stock.as_ref(),
        }
    }

    /// Replace the snapshot of one view
    pub fn replace(&mut self, kind: ViewKind, table: Table) {
        let slot = match kind {
            ViewKind::Stores => &mut self.stores,
            ViewKind::Products => &mut self.products,
            ViewKind::Stock => &mut self.stock,
        };
        *slot = Some(table);
    }

    pub fn stores(&self) -> Option<&Table> {
        self.stores.as_ref()
    }

    pub fn products(&self) -> Option<&Table> {
        self.products.as_ref()
    }

    pub fn stock(&self) -> Option<&Table> {
        self.stock.as_ref()
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in ViewKind::ALL {
            if let Some(table) = self.get(kind) {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{}", table)?;
                first = false;
            }
        }
        Ok(())
    }
}
