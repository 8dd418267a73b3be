//! Command line front-end
//!
//! Each invocation is one page lifecycle: build the page, run a single
//! action (or just the initial load), print the affected views and the
//! status notice.

use crate::client::HttpInventoryClient;
use crate::config::ClientConfig;
use crate::core::entity::{EntityId, StockKey, StockQuery};
use crate::core::error::ClientResult;
use crate::core::service::InventoryApi;
use crate::dialog::{Dialog, ScriptedDialog, TerminalDialog};
use crate::handlers::{HandlerOutcome, Page, ProductForm, StockForm, StoreForm};
use crate::view::ViewKind;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(name = "stockroom", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a YAML configuration file.
    #[arg(short, long, env = "STOCKROOM_CONFIG")]
    pub config: Option<String>,

    /// Base URL of the inventory API (overrides the config file).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Answer "yes" to every confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute; defaults to `dashboard`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and print stores, products and stock.
    Dashboard,

    /// Check that the API is reachable.
    Health,

    /// Store operations.
    #[command(subcommand)]
    Stores(StoreCommand),

    /// Product operations.
    #[command(subcommand)]
    Products(ProductCommand),

    /// Stock operations.
    #[command(subcommand)]
    Stock(StockCommand),

    /// Delete every store, product and stock entry.
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// List stores.
    List,

    /// Add a store.
    Add {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        city: String,
    },

    /// Delete a store.
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// List products.
    List,

    /// Add a product.
    Add {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        sku: String,
    },

    /// Delete a product.
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// List stock, optionally filtered.
    List {
        #[arg(long)]
        store_id: Option<EntityId>,

        #[arg(long)]
        product_id: Option<EntityId>,
    },

    /// Create or overwrite a stock entry.
    Set {
        #[arg(long, default_value = "")]
        store_id: String,

        #[arg(long, default_value = "")]
        product_id: String,

        #[arg(long, default_value = "")]
        quantity: String,
    },

    /// Prompt for a new quantity of an existing entry.
    Update {
        store_id: EntityId,
        product_id: EntityId,
    },

    /// Delete a stock entry.
    Delete {
        store_id: EntityId,
        product_id: EntityId,
    },
}

// ============================================================================
// Execution
// ============================================================================

const ALL_VIEWS: &[ViewKind] = &ViewKind::ALL;
const STORE_VIEWS: &[ViewKind] = &[ViewKind::Stores, ViewKind::Stock];
const PRODUCT_VIEWS: &[ViewKind] = &[ViewKind::Products, ViewKind::Stock];
const STOCK_VIEWS: &[ViewKind] = &[ViewKind::Stock];

/// Resolve configuration: file (if any), then environment, then flags
pub fn load_config(args: &CliArgs) -> Result<ClientConfig> {
    let config = match &args.config {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::default(),
    };
    let config = config
        .with_env_overrides()?
        .with_overrides(args.base_url.clone(), None)?;
    Ok(config)
}

/// Run the parsed command against the configured API
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let config = load_config(&args)?;
    tracing::debug!(
        base_url = %config.api.base_url,
        cascade = ?config.cascade,
        "Using configuration"
    );

    let api = HttpInventoryClient::new(&config.api).context("creating API client")?;
    let command = args.command.unwrap_or(Command::Dashboard);

    let code = if args.yes {
        let mut page = Page::new(api, ScriptedDialog::assume_yes(), &config);
        execute(&mut page, command).await
    } else {
        let mut page = Page::new(api, TerminalDialog::stdio(), &config);
        execute(&mut page, command).await
    };
    Ok(code)
}

/// Run one command on a page and print the result
pub async fn execute<A: InventoryApi, D: Dialog>(
    page: &mut Page<A, D>,
    command: Command,
) -> ExitCode {
    let (outcome, shown): (HandlerOutcome, &[ViewKind]) = match command {
        Command::Dashboard => (loaded(page.bootstrap().await), ALL_VIEWS),
        Command::Health => {
            return match page.api().health().await {
                Ok(true) => {
                    println!("API is healthy");
                    ExitCode::SUCCESS
                }
                Ok(false) => {
                    println!("API reported an unhealthy status");
                    ExitCode::FAILURE
                }
                Err(err) => {
                    eprintln!("API unreachable: {}", err);
                    ExitCode::FAILURE
                }
            };
        }
        Command::Stores(cmd) => match cmd {
            StoreCommand::List => (
                loaded(page.reload(ViewKind::Stores).await),
                &STORE_VIEWS[..1],
            ),
            StoreCommand::Add { name, city } => {
                page.store_form = StoreForm::new(name, city);
                (page.add_store().await, &STORE_VIEWS[..1])
            }
            StoreCommand::Delete { id } => (page.delete_store(id).await, STORE_VIEWS),
        },
        Command::Products(cmd) => match cmd {
            ProductCommand::List => (
                loaded(page.reload(ViewKind::Products).await),
                &PRODUCT_VIEWS[..1],
            ),
            ProductCommand::Add { name, sku } => {
                page.product_form = ProductForm::new(name, sku);
                (page.add_product().await, &PRODUCT_VIEWS[..1])
            }
            ProductCommand::Delete { id } => (page.delete_product(id).await, PRODUCT_VIEWS),
        },
        Command::Stock(cmd) => {
            let outcome = match cmd {
                StockCommand::List {
                    store_id,
                    product_id,
                } => loaded(
                    page.filter_stock(StockQuery {
                        store_id,
                        product_id,
                    })
                    .await,
                ),
                StockCommand::Set {
                    store_id,
                    product_id,
                    quantity,
                } => {
                    page.stock_form = StockForm::new(store_id, product_id, quantity);
                    page.submit_stock().await
                }
                StockCommand::Update {
                    store_id,
                    product_id,
                } => page.update_stock(StockKey::new(store_id, product_id)).await,
                StockCommand::Delete {
                    store_id,
                    product_id,
                } => page.delete_stock(StockKey::new(store_id, product_id)).await,
            };
            (outcome, STOCK_VIEWS)
        }
        Command::Clear => (page.clear_all().await, ALL_VIEWS),
    };

    for kind in shown {
        if let Some(table) = page.views().get(*kind) {
            println!("{}", table);
        }
    }
    if let Some(notice) = page.notifier().last() {
        println!("{}", notice.status_line());
    }

    match outcome {
        HandlerOutcome::Done | HandlerOutcome::Cancelled => ExitCode::SUCCESS,
        HandlerOutcome::Invalid(_) | HandlerOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

/// Loads report failures through the notifier; map them onto an outcome
fn loaded(result: ClientResult<()>) -> HandlerOutcome {
    match result {
        Ok(()) => HandlerOutcome::Done,
        Err(err) => HandlerOutcome::Failed(err),
    }
}
