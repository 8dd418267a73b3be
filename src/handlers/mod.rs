//! Mutation handlers and the page that owns them

pub mod forms;
pub mod page;

pub use forms::{ProductForm, StockForm, StoreForm};
pub use page::{HandlerOutcome, Page};
