//! # Stockroom
//!
//! Client and terminal front-end for an inventory REST API that manages
//! stores, products and per-store stock levels.
//!
//! ## Features
//!
//! - **Typed API client**: `reqwest`-based transport with server error messages surfaced as-is
//! - **Swappable backend**: everything talks to the [`InventoryApi`](core::InventoryApi) trait
//! - **Joined stock view**: stock rows show store/product names, falling back to raw ids
//! - **Local validation**: forms are trimmed and checked before any request is made
//! - **Explicit cascade policy**: server-side or client-side removal of dependent stock
//! - **Status notices**: one banner at a time, success messages auto-dismiss
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockroom::prelude::*;
//!
//! let config = ClientConfig::default().with_env_overrides()?;
//! let api = HttpInventoryClient::new(&config.api)?;
//! let mut page = Page::new(api, ScriptedDialog::assume_yes(), &config);
//!
//! page.bootstrap().await?;
//! page.store_form = StoreForm::new("Central", "Berlin");
//! page.add_store().await;
//!
//! println!("{}", page.views());
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod dialog;
pub mod handlers;
pub mod notify;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{
            Entity, EntityId, NewProduct, NewStore, Product, StockEntry, StockKey, StockQuery,
            Store,
        },
        error::{ClientError, ClientResult, ConfigError, ValidationError},
        service::InventoryApi,
    };

    // === Client & storage ===
    pub use crate::client::{HttpInventoryClient, HttpTransport};
    pub use crate::storage::InMemoryInventory;

    // === Config ===
    pub use crate::config::{CascadePolicy, ClientConfig};

    // === UI ===
    pub use crate::dialog::{Dialog, ScriptedDialog, TerminalDialog};
    pub use crate::handlers::{HandlerOutcome, Page, ProductForm, StockForm, StoreForm};
    pub use crate::notify::{Notice, Notifier, Severity};
    pub use crate::view::{Table, ViewKind, ViewState};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
