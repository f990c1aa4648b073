//! Demo walkthrough: hydrate, sign in, shop, place an order, flip the theme.
//!
//! State is persisted to `shopfront-data.json` in the working directory, so
//! a second run starts from the previous session's orders and preferences.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use shopfront::app::{self, AppEnvironment, app_store};
use shopfront::auth::AuthAction;
use shopfront::cart::CartAction;
use shopfront::catalog::{CatalogService, HttpCatalog, StaticCatalog};
use shopfront::storage::FileStore;
use shopfront::theme::ThemeAction;
use shopfront::types::Product;
use shopfront::{AppAction, CatalogError};

async fn load_catalog() -> Vec<Product> {
    let catalog: Result<Vec<Product>, CatalogError> = match HttpCatalog::new() {
        Ok(http) => http.fetch_products().await,
        Err(e) => Err(e),
    };
    match catalog {
        Ok(products) => {
            tracing::info!(count = products.len(), "Loaded catalog from API");
            products
        }
        Err(error) => {
            tracing::warn!(%error, "Catalog unavailable, using sample inventory");
            match StaticCatalog::with_sample_inventory().fetch_products().await {
                Ok(products) => products,
                Err(_) => Vec::new(),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage = Arc::new(FileStore::new("shopfront-data.json"));
    let store = app_store(AppEnvironment::with_storage(storage));

    app::hydrate(&store).await?;
    let (orders_before, theme) = store
        .state(|s| (s.orders.history.len(), s.theme.mode))
        .await;
    tracing::info!(orders = orders_before, theme = theme.as_str(), "Session restored");

    if !store.state(|s| s.auth.is_authenticated).await {
        let outcome = store
            .send_and_wait_for(
                AppAction::Auth(AuthAction::Login {
                    email: "test@zignuts.com".to_string(),
                    password: "123456".to_string(),
                }),
                |action| {
                    matches!(
                        action,
                        AppAction::Auth(
                            AuthAction::LoginSucceeded { .. } | AuthAction::LoginFailed { .. }
                        )
                    )
                },
                app::ACTION_WAIT_TIMEOUT,
            )
            .await?;
        tracing::info!(?outcome, "Login finished");
    }

    let products = load_catalog().await;
    for product in products.iter().take(2) {
        let mut handle = store
            .send(AppAction::Cart(CartAction::AddProduct(product.clone())))
            .await?;
        handle.wait().await;
    }
    let (items, total) = store
        .state(|s| (s.cart.item_count(), s.cart.total_price()))
        .await;
    tracing::info!(items, total, "Cart filled");

    if app::place_cart_order(&store).await? {
        let latest = store.state(|s| s.orders.history.first().cloned()).await;
        if let Some(order) = latest {
            tracing::info!(id = %order.id, total = order.total_price, "Order placed");
        }
    }

    let current = store.state(|s| s.theme.mode).await;
    let mut handle = store
        .send(AppAction::Theme(ThemeAction::SetMode(current.toggled())))
        .await?;
    handle.wait().await;
    tracing::info!(theme = current.toggled().as_str(), "Theme updated");

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
