//! Page-level tests: handlers, views and notices driven over HTTP
//!
//! Each test runs a `Page` with the real HTTP client against the mock
//! backend, the same way the CLI does, with scripted dialog answers.

mod common;

use stockroom::config::NotificationConfig;
use stockroom::prelude::*;

type HttpPage = Page<HttpInventoryClient, ScriptedDialog>;

fn page(client: HttpInventoryClient, dialog: ScriptedDialog) -> HttpPage {
    Page::new(client, dialog, &ClientConfig::default())
}

#[tokio::test]
async fn test_central_berlin_scenario() {
    let (_backend, client) = common::start().await;
    let mut page = page(client, ScriptedDialog::new());

    page.bootstrap().await.unwrap();
    assert!(page.views().stores().unwrap().is_empty());
    let stock = page.views().stock().unwrap().to_string();
    assert!(stock.contains("No stock entries"));

    page.store_form = StoreForm::new("Central", "Berlin");
    assert!(page.add_store().await.is_done());
    let stores = page.views().stores().unwrap();
    assert_eq!(stores.cell(0, "ID"), Some("1"));
    assert_eq!(stores.cell(0, "Name"), Some("Central"));
    assert_eq!(stores.cell(0, "City"), Some("Berlin"));

    page.product_form = ProductForm::new("Widget", "SKU-001");
    assert!(page.add_product().await.is_done());

    page.stock_form = StockForm::new("1", "1", "5");
    assert!(page.submit_stock().await.is_done());
    page.stock_form = StockForm::new("1", "1", "9");
    assert!(page.submit_stock().await.is_done());

    let stock = page.views().stock().unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock.cell(0, "Store"), Some("Central"));
    assert_eq!(stock.cell(0, "Product"), Some("Widget"));
    assert_eq!(stock.cell(0, "Quantity"), Some("9"));
    assert_eq!(page.stock_form, StockForm::default());
}

#[tokio::test]
async fn test_empty_required_field_issues_no_request() {
    let (backend, client) = common::start().await;
    let mut page = page(client, ScriptedDialog::new());

    page.store_form = StoreForm::new("Central", "   ");
    let outcome = page.add_store().await;

    assert!(matches!(outcome, HandlerOutcome::Invalid(_)));
    assert_eq!(backend.hits(), 0);
    let notice = page.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.starts_with("Please fix the form"));
    assert_eq!(page.store_form, StoreForm::new("Central", "   "));
}

#[tokio::test]
async fn test_non_numeric_stock_field_issues_no_request() {
    let (backend, client) = common::start().await;
    let mut page = page(client, ScriptedDialog::new());

    page.stock_form = StockForm::new("one", "1", "5");

    assert!(matches!(page.submit_stock().await, HandlerOutcome::Invalid(_)));
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_server_error_becomes_error_notice() {
    let (_backend, client) = common::start().await;
    let mut page = page(client, ScriptedDialog::new());

    page.stock_form = StockForm::new("1", "1", "5");
    let outcome = page.submit_stock().await;

    assert!(matches!(outcome, HandlerOutcome::Failed(ref err) if err.status() == Some(400)));
    let notice = page.notifier().current().unwrap();
    assert_eq!(notice.message, "Saving stock failed: Store not found");
}

#[tokio::test]
async fn test_unmatched_ids_render_as_fallback() {
    let inventory = InMemoryInventory::new().with_cascade(false);
    let (_backend, client) = common::start_with(inventory).await;
    client
        .create_store(NewStore {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        })
        .await
        .unwrap();
    client
        .create_product(NewProduct {
            name: "Widget".to_string(),
            sku: "SKU-001".to_string(),
        })
        .await
        .unwrap();
    client
        .upsert_stock(StockEntry::new(StockKey::new(1, 1), 4))
        .await
        .unwrap();
    let mut page = page(client, ScriptedDialog::assume_yes());

    assert!(page.delete_product(1).await.is_done());

    let stock = page.views().stock().unwrap();
    assert_eq!(stock.cell(0, "Store"), Some("Central"));
    assert_eq!(stock.cell(0, "Product"), Some("ID 1"));
}

#[tokio::test]
async fn test_client_cascade_over_http() {
    let inventory = InMemoryInventory::new().with_cascade(false);
    let (backend, client) = common::start_with(inventory).await;
    client
        .create_store(NewStore {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        })
        .await
        .unwrap();
    for sku in ["SKU-001", "SKU-002"] {
        client
            .create_product(NewProduct {
                name: "Widget".to_string(),
                sku: sku.to_string(),
            })
            .await
            .unwrap();
    }
    for product_id in [1, 2] {
        client
            .upsert_stock(StockEntry::new(StockKey::new(1, product_id), 1))
            .await
            .unwrap();
    }
    let config = ClientConfig {
        cascade: CascadePolicy::Client,
        ..ClientConfig::default()
    };
    let mut page = Page::new(client, ScriptedDialog::assume_yes(), &config);

    assert!(page.delete_store(1).await.is_done());

    assert!(backend.inventory.list_stores().await.unwrap().is_empty());
    assert!(
        backend
            .inventory
            .list_stock(StockQuery::all())
            .await
            .unwrap()
            .is_empty()
    );
    assert!(page.views().stock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_stock_entry() {
    let (backend, client) = common::start().await;
    client
        .create_store(NewStore {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        })
        .await
        .unwrap();
    client
        .create_product(NewProduct {
            name: "Widget".to_string(),
            sku: "SKU-001".to_string(),
        })
        .await
        .unwrap();
    let key = StockKey::new(1, 1);
    client.upsert_stock(StockEntry::new(key, 5)).await.unwrap();

    let dialog = ScriptedDialog::assume_yes().answer_with(Some("12"));
    let mut page = page(client, dialog);

    assert!(page.update_stock(key).await.is_done());
    assert_eq!(page.views().stock().unwrap().cell(0, "Quantity"), Some("12"));

    assert!(page.delete_stock(key).await.is_done());
    assert!(page.views().stock().unwrap().is_empty());
    assert!(
        backend
            .inventory
            .list_stock(StockQuery::all())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_unreachable_api_reports_load_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut page = page(
        common::client_for(&format!("http://{}", addr)),
        ScriptedDialog::new(),
    );

    let err = page.bootstrap().await.unwrap_err();

    assert_eq!(err.error_code(), "TRANSPORT_ERROR");
    assert!(page.views().stores().is_none());
    let notice = page.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.starts_with("Failed to load"));
}

#[tokio::test]
async fn test_success_notice_expires_but_errors_persist() {
    let (_backend, client) = common::start().await;
    let config = ClientConfig {
        notifications: NotificationConfig {
            dismiss_after_ms: 0,
        },
        ..ClientConfig::default()
    };
    let mut page = Page::new(client, ScriptedDialog::new(), &config);

    page.store_form = StoreForm::new("Central", "Berlin");
    assert!(page.add_store().await.is_done());
    assert!(page.notifier().current().is_none());
    assert_eq!(page.notifier().last().unwrap().severity, Severity::Success);

    page.stock_form = StockForm::new("1", "9", "1");
    page.submit_stock().await;
    let notice = page.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.ends_with("Product not found"));
}

#[tokio::test]
async fn test_cli_commands_drive_the_page() {
    use std::process::ExitCode;
    use stockroom::cli::{self, Command, StockCommand, StoreCommand};

    let (backend, client) = common::start().await;
    let mut page = page(client, ScriptedDialog::assume_yes());

    let code = cli::execute(
        &mut page,
        Command::Stores(StoreCommand::Add {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        }),
    )
    .await;
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(backend.inventory.list_stores().await.unwrap().len(), 1);

    // Rejected by the server: unknown product
    let code = cli::execute(
        &mut page,
        Command::Stock(StockCommand::Set {
            store_id: "1".to_string(),
            product_id: "1".to_string(),
            quantity: "5".to_string(),
        }),
    )
    .await;
    assert_eq!(code, ExitCode::FAILURE);
    let notice = page.notifier().last().unwrap();
    assert!(notice.message.ends_with("Product not found"));

    // Rejected locally before any request
    let hits = backend.hits();
    let code = cli::execute(
        &mut page,
        Command::Stores(StoreCommand::Add {
            name: String::new(),
            city: "Berlin".to_string(),
        }),
    )
    .await;
    assert_eq!(code, ExitCode::FAILURE);
    assert_eq!(backend.hits(), hits);

    let code = cli::execute(&mut page, Command::Clear).await;
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(backend.inventory.list_stores().await.unwrap().is_empty());
    assert!(page.views().stores().unwrap().is_empty());
}

#[tokio::test]
async fn test_cli_declined_confirmation_exits_cleanly() {
    use std::process::ExitCode;
    use stockroom::cli::{self, Command, StoreCommand};

    let (backend, client) = common::start().await;
    client
        .create_store(NewStore {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        })
        .await
        .unwrap();
    let mut page = page(client, ScriptedDialog::new().confirm_with(false));

    let code = cli::execute(&mut page, Command::Stores(StoreCommand::Delete { id: 1 })).await;

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(backend.inventory.list_stores().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_loader_keeps_its_snapshot_and_others_still_load() {
    let (backend, client) = common::start().await;
    client
        .create_store(NewStore {
            name: "Central".to_string(),
            city: "Berlin".to_string(),
        })
        .await
        .unwrap();
    client
        .create_product(NewProduct {
            name: "Widget".to_string(),
            sku: "SKU-001".to_string(),
        })
        .await
        .unwrap();
    let mut page = page(client, ScriptedDialog::new());
    page.bootstrap().await.unwrap();
    let products_before = page.views().products().cloned();
    let stock_before = page.views().stock().cloned();

    backend.set_products_down(true);
    backend
        .inventory
        .create_store(NewStore {
            name: "North".to_string(),
            city: "Hamburg".to_string(),
        })
        .await
        .unwrap();
    let err = page.bootstrap().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(page.views().stores().unwrap().len(), 2);
    assert_eq!(page.views().products().cloned(), products_before);
    // The stock join needs products too, so it keeps its old snapshot as well
    assert_eq!(page.views().stock().cloned(), stock_before);
    let notice = page.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.ends_with("Products unavailable"));
}

#[tokio::test]
async fn test_failed_first_load_leaves_view_empty() {
    let (backend, client) = common::start().await;
    backend.set_products_down(true);
    let mut page = page(client, ScriptedDialog::new());

    assert!(page.bootstrap().await.is_err());

    assert!(page.views().stores().is_some());
    assert!(page.views().products().is_none());
    assert_eq!(page.notifier().current().unwrap().severity, Severity::Error);
}
