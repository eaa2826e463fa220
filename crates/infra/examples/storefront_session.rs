//! Example: browsing the catalog and reading the cart with one session
//!
//! Loads configuration from the environment (or a `storefront.toml`), logs in,
//! and fires several authenticated calls at once. When the access token has
//! expired, the calls share a single renewal.
//!
//! ```bash
//! export STOREFRONT_API_BASE_URL=http://localhost:8000/api/v1
//! export STOREFRONT_EMAIL=shopper@example.com STOREFRONT_PASSWORD=secret
//! RUST_LOG=storefront_infra=debug cargo run --example storefront_session
//! ```

use std::sync::Arc;

use anyhow::Context;
use storefront_core::SessionGuard;
use storefront_infra::api::{ApiClient, ApiClientConfig};
use storefront_infra::config;
use storefront_infra::services::{AccountService, CartService, CatalogService, OrderService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load().context("no storefront configuration found")?;
    let client = Arc::new(ApiClient::new(ApiClientConfig::from(&settings.api))?);

    let accounts = AccountService::new(Arc::clone(&client));
    let session = SessionGuard::new(Arc::clone(client.credentials()), client.clone());

    if !session.is_logged_in().await {
        let email = std::env::var("STOREFRONT_EMAIL").context("STOREFRONT_EMAIL not set")?;
        let password =
            std::env::var("STOREFRONT_PASSWORD").context("STOREFRONT_PASSWORD not set")?;
        accounts.login(&email, &password).await?;
    }

    let catalog = CatalogService::new(Arc::clone(&client));
    let cart = CartService::new(Arc::clone(&client));
    let orders = OrderService::new(Arc::clone(&client));

    let (arrivals, cart_items, history) =
        tokio::join!(catalog.new_arrivals(Some(4)), cart.get_cart(), orders.orders(&[]));
    let (arrivals, cart_items, history) = (arrivals?, cart_items?, history?);

    info!(%arrivals, "new arrivals");
    info!(cart = %cart_items, "cart");
    info!(orders = %history, "order history");

    if accounts.logout().await {
        info!("session closed");
    }

    Ok(())
}
