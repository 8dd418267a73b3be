//! The inventory page: views, forms, notices and the handlers that drive them
//!
//! Every handler follows the same cycle: read the relevant form or ask the
//! dialog, validate locally, call the API, then reload the affected views
//! and raise a notice. Failures never escape as panics or `Err`; they come
//! back as a [`HandlerOutcome`] and an error notice, with the form left as
//! the user typed it so they can retry.

use crate::config::{CascadePolicy, ClientConfig};
use crate::core::entity::{EntityId, StockEntry, StockKey, StockQuery};
use crate::core::error::{ClientError, ClientResult, ValidationError};
use crate::core::service::InventoryApi;
use crate::core::validation::FormValidator;
use crate::dialog::Dialog;
use crate::handlers::forms::{ProductForm, StockForm, StoreForm};
use crate::notify::Notifier;
use crate::view::{ViewKind, ViewState, loaders};

/// Result of a user action
#[derive(Debug)]
pub enum HandlerOutcome {
    /// The mutation went through
    Done,
    /// The user declined a confirmation or cancelled a prompt
    Cancelled,
    /// Local validation failed; no request was made
    Invalid(ValidationError),
    /// The API call failed
    Failed(ClientError),
}

impl HandlerOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, HandlerOutcome::Done)
    }
}

/// One page worth of inventory UI state
pub struct Page<A, D> {
    api: A,
    dialog: D,
    cascade: CascadePolicy,
    views: ViewState,
    notifier: Notifier,
    pub store_form: StoreForm,
    pub product_form: ProductForm,
    pub stock_form: StockForm,
}

impl<A: InventoryApi, D: Dialog> Page<A, D> {
    pub fn new(api: A, dialog: D, config: &ClientConfig) -> Self {
        Self {
            api,
            dialog,
            cascade: config.cascade,
            views: ViewState::new(),
            notifier: Notifier::new(config.notifications.dismiss_after()),
            store_form: StoreForm::default(),
            product_form: ProductForm::default(),
            stock_form: StockForm::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn views(&self) -> &ViewState {
        &self.views
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn cascade(&self) -> CascadePolicy {
        self.cascade
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Initial load of all three collections
    ///
    /// A failing view keeps its previous snapshot and does not stop the
    /// others from loading. Returns the first failure, if any.
    pub async fn bootstrap(&mut self) -> ClientResult<()> {
        tracing::info!("Loading all inventory views");
        let mut first_error = None;
        for kind in ViewKind::ALL {
            if let Err(err) = self.reload(kind).await {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Re-fetch one view; on failure raise an error notice and keep the old snapshot
    pub async fn reload(&mut self, kind: ViewKind) -> ClientResult<()> {
        let result = match kind {
            ViewKind::Stores => loaders::load_stores(&self.api).await,
            ViewKind::Products => loaders::load_products(&self.api).await,
            ViewKind::Stock => loaders::load_stock(&self.api, self.views.stock_filter).await,
        };

        match result {
            Ok(table) => {
                self.views.replace(kind, table);
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(format!("Failed to load {}: {}", kind, err));
                Err(err)
            }
        }
    }

    /// Change the stock filter and reload the stock view
    pub async fn filter_stock(&mut self, query: StockQuery) -> ClientResult<()> {
        self.views.stock_filter = query;
        self.reload(ViewKind::Stock).await
    }

    /// Reload `kinds` after a successful mutation, then report
    async fn finish(&mut self, kinds: &[ViewKind], success: String) -> HandlerOutcome {
        for kind in kinds {
            if let Err(err) = self.reload(*kind).await {
                self.notifier.error(format!(
                    "{}, but refreshing {} failed: {}",
                    success, kind, err
                ));
                return HandlerOutcome::Done;
            }
        }
        self.notifier.success(success);
        HandlerOutcome::Done
    }

    fn invalid(&mut self, err: ValidationError) -> HandlerOutcome {
        self.notifier.error(format!("Please fix the form: {}", err));
        HandlerOutcome::Invalid(err)
    }

    fn failed(&mut self, action: &str, err: ClientError) -> HandlerOutcome {
        self.notifier.error(format!("{} failed: {}", action, err));
        HandlerOutcome::Failed(err)
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Submit the "add store" form
    pub async fn add_store(&mut self) -> HandlerOutcome {
        let payload = match self.store_form.parse() {
            Ok(payload) => payload,
            Err(err) => return self.invalid(err),
        };

        match self.api.create_store(payload).await {
            Ok(store) => {
                tracing::info!(store_id = store.id, "Store created");
                self.store_form.clear();
                self.finish(&[ViewKind::Stores], format!("Store '{}' added", store.name))
                    .await
            }
            Err(err) => self.failed("Adding store", err),
        }
    }

    /// Delete a store after confirmation
    pub async fn delete_store(&mut self, id: EntityId) -> HandlerOutcome {
        let question = match self.cascade {
            CascadePolicy::Server => format!("Delete store {}?", id),
            CascadePolicy::Client => format!("Delete store {} and all of its stock entries?", id),
        };
        if !self.dialog.confirm(&question) {
            return HandlerOutcome::Cancelled;
        }

        if let Err(err) = self.cascade_stock(StockQuery::for_store(id)).await {
            return self.failed("Deleting store stock", err);
        }

        match self.api.delete_store(id).await {
            Ok(()) => {
                tracing::info!(store_id = id, "Store deleted");
                self.finish(
                    &[ViewKind::Stores, ViewKind::Stock],
                    format!("Store {} deleted", id),
                )
                .await
            }
            Err(err) => self.failed("Deleting store", err),
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Submit the "add product" form
    pub async fn add_product(&mut self) -> HandlerOutcome {
        let payload = match self.product_form.parse() {
            Ok(payload) => payload,
            Err(err) => return self.invalid(err),
        };

        match self.api.create_product(payload).await {
            Ok(product) => {
                tracing::info!(product_id = product.id, "Product created");
                self.product_form.clear();
                self.finish(
                    &[ViewKind::Products],
                    format!("Product '{}' added", product.name),
                )
                .await
            }
            Err(err) => self.failed("Adding product", err),
        }
    }

    /// Delete a product after confirmation
    pub async fn delete_product(&mut self, id: EntityId) -> HandlerOutcome {
        let question = match self.cascade {
            CascadePolicy::Server => format!("Delete product {}?", id),
            CascadePolicy::Client => {
                format!("Delete product {} and all of its stock entries?", id)
            }
        };
        if !self.dialog.confirm(&question) {
            return HandlerOutcome::Cancelled;
        }

        if let Err(err) = self.cascade_stock(StockQuery::for_product(id)).await {
            return self.failed("Deleting product stock", err);
        }

        match self.api.delete_product(id).await {
            Ok(()) => {
                tracing::info!(product_id = id, "Product deleted");
                self.finish(
                    &[ViewKind::Products, ViewKind::Stock],
                    format!("Product {} deleted", id),
                )
                .await
            }
            Err(err) => self.failed("Deleting product", err),
        }
    }

    /// Remove dependent stock entries when the client owns the cascade
    ///
    /// No-op under [`CascadePolicy::Server`]. Stops at the first failure so
    /// the parent is never deleted with half its stock left behind.
    async fn cascade_stock(&self, query: StockQuery) -> ClientResult<usize> {
        if self.cascade == CascadePolicy::Server {
            return Ok(0);
        }

        let entries = self.api.list_stock(query).await?;
        for entry in &entries {
            self.api.delete_stock(entry.key()).await?;
        }
        tracing::debug!(deleted = entries.len(), "Removed dependent stock entries");
        Ok(entries.len())
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Submit the "set stock" form (create or overwrite the quantity)
    pub async fn submit_stock(&mut self) -> HandlerOutcome {
        let entry = match self.stock_form.parse() {
            Ok(entry) => entry,
            Err(err) => return self.invalid(err),
        };

        match self.api.upsert_stock(entry).await {
            Ok(saved) => {
                tracing::info!(
                    store_id = saved.store_id,
                    product_id = saved.product_id,
                    quantity = saved.quantity,
                    "Stock saved"
                );
                self.stock_form.clear();
                self.finish(&[ViewKind::Stock], "Stock updated".to_string())
                    .await
            }
            Err(err) => self.failed("Saving stock", err),
        }
    }

    /// Ask for a new quantity and overwrite an existing entry
    pub async fn update_stock(&mut self, key: StockKey) -> HandlerOutcome {
        let Some(answer) = self
            .dialog
            .prompt(&format!("New quantity for {}", key), Some("0"))
        else {
            return HandlerOutcome::Cancelled;
        };

        let mut v = FormValidator::new();
        let quantity = v.quantity("quantity", &answer);
        if let Err(err) = v.finish() {
            return self.invalid(err);
        }
        let Some(quantity) = quantity else {
            return self.invalid(ValidationError::field("quantity", "quantity is required"));
        };

        match self.api.upsert_stock(StockEntry::new(key, quantity)).await {
            Ok(_) => {
                self.finish(&[ViewKind::Stock], format!("Stock for {} updated", key))
                    .await
            }
            Err(err) => self.failed("Updating stock", err),
        }
    }

    /// Delete one stock entry after confirmation
    pub async fn delete_stock(&mut self, key: StockKey) -> HandlerOutcome {
        if !self
            .dialog
            .confirm(&format!("Delete the stock entry for {}?", key))
        {
            return HandlerOutcome::Cancelled;
        }

        match self.api.delete_stock(key).await {
            Ok(()) => {
                tracing::info!(
                    store_id = key.store_id,
                    product_id = key.product_id,
                    "Stock deleted"
                );
                self.finish(&[ViewKind::Stock], "Stock entry deleted".to_string())
                    .await
            }
            Err(err) => self.failed("Deleting stock", err),
        }
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Wipe every collection on the backend after confirmation
    pub async fn clear_all(&mut self) -> HandlerOutcome {
        if !self
            .dialog
            .confirm("Delete ALL stores, products and stock?")
        {
            return HandlerOutcome::Cancelled;
        }

        match self.api.clear().await {
            Ok(()) => {
                tracing::warn!("All inventory data cleared");
                self.finish(&ViewKind::ALL, "All data cleared".to_string())
                    .await
            }
            Err(err) => self.failed("Clearing data", err),
        }
    }
}
