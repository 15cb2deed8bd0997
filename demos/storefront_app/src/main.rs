// demos/storefront_app/src/main.rs

// Declare modules for the application
mod catalog;
mod config;
mod errors;
mod services;
mod views;

use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult}; // Use the app's Result alias
use crate::services::order_mock::MockOrderGateway;

use std::sync::Arc;
use tote::{format_amount, FileStorage, StorefrontSession, VariantSelection};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[tokio::main]
async fn main() {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront demo session...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      std::process::exit(1);
    }
  };

  if let Err(e) = run(&app_config).await {
    tracing::error!(error = %e, shopper_message = %e.user_message(), "Storefront session ended with an error.");
    std::process::exit(1);
  }
}

/// Walks one shopper through browsing, saving, adjusting the bag and checking out.
async fn run(app_config: &AppConfig) -> AppResult<()> {
  let storage = FileStorage::open(app_config.data_dir.clone()).map_err(AppError::from)?;
  let session = StorefrontSession::open(Arc::new(storage), app_config.store.clone())?;
  tracing::info!(
    restored_lines = session.cart().len(),
    restored_saved = session.wishlist().len(),
    "Session restored from {}",
    app_config.data_dir.display()
  );

  views::render_catalog()?;
  let views = views::mount(&session);

  // Product page: pick a variant, add twice, the second add merges.
  let tee = catalog::find("1")?;
  let medium_red = VariantSelection::new("M", "Red").label();
  session.cart().add_to_cart(tee.to_cart_item(1, medium_red.clone()))?;
  session.cart().add_to_cart(tee.to_cart_item(1, medium_red.clone()))?;
  session
    .cart()
    .add_to_cart(tee.to_cart_item(1, VariantSelection::new("L", "Black").label()))?;

  // Product cards: heart a few items, un-heart one.
  for id in ["3", "5", "8"] {
    session.wishlist().toggle_wishlist(catalog::find(id)?.to_wishlist_item())?;
  }
  session.wishlist().toggle_wishlist(catalog::find("8")?.to_wishlist_item())?;

  // Wishlist page: move the hoodie into the bag.
  let hoodie = catalog::find("3")?;
  if !session.move_to_cart(hoodie.product_id)? {
    return Err(AppError::NotFound(format!("'{}' was not in the wishlist", hoodie.name)));
  }

  // Cart page: stepper up on the tee, remove the black one.
  session.cart().update_quantity(tee.product_id, 3, medium_red.as_deref())?;
  session
    .cart()
    .remove_from_cart(tee.product_id, Some("Size: L, Color: Black"))?;

  // Checkout page.
  let draft = session.checkout_draft(&app_config.user_id, &app_config.shipping_address)?;
  let payload = serde_json::to_string_pretty(&draft).map_err(|e| AppError::Internal(e.to_string()))?;
  tracing::debug!(%payload, "Order payload");
  tracing::info!(items = draft.item_count(), total = %format_amount(draft.total_amount), "Proceeding to checkout.");

  let gateway = MockOrderGateway::new(app_config.mock_order_latency_ms);
  let placed = session
    .place_order(&gateway, &app_config.user_id, &app_config.shipping_address)
    .await;
  views.unmount();

  match placed {
    Ok(receipt) => {
      tracing::info!(order_id = %receipt.order_id, status = %receipt.status, "Order placed successfully!");
      Ok(())
    }
    Err(e) => {
      tracing::warn!(cart_lines = session.cart().len(), "Order failed; the bag was kept for a retry.");
      Err(AppError::from(e))
    }
  }
}
