// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tote::{StoreConfig, WriteFailurePolicy};

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  /// Directory the file-backed storage writes `cart.json` / `wishlist.json` into.
  pub data_dir: PathBuf,
  pub store: StoreConfig,

  // Checkout details for the scripted session
  pub user_id: String,
  pub shipping_address: String,

  // Mock order service
  pub mock_order_latency_ms: u64,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let data_dir = PathBuf::from(get_env("TOTE_DATA_DIR").unwrap_or_else(|_| ".tote".to_string()));

    let write_failure_policy = match get_env("TOTE_WRITE_FAILURE_POLICY") {
      Ok(raw) => raw.parse::<WriteFailurePolicy>()?,
      Err(_) => WriteFailurePolicy::default(),
    };
    let mut store = StoreConfig::default().with_policy(write_failure_policy);
    if let Ok(key) = get_env("TOTE_CART_KEY") {
      store.cart_key = key;
    }
    if let Ok(key) = get_env("TOTE_WISHLIST_KEY") {
      store.wishlist_key = key;
    }
    store.validate()?;

    let user_id = get_env("TOTE_USER_ID").unwrap_or_else(|_| "demo-user".to_string());
    let shipping_address =
      get_env("TOTE_SHIPPING_ADDRESS").unwrap_or_else(|_| "42 Residency Road, Bengaluru 560025".to_string());

    let mock_order_latency_ms = get_env("MOCK_ORDER_LATENCY_MS")
      .unwrap_or_else(|_| "50".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid MOCK_ORDER_LATENCY_MS: {}", e)))?;

    tracing::info!(data_dir = %data_dir.display(), policy = ?store.write_failure_policy, "Application configuration loaded successfully.");

    Ok(Self {
      data_dir,
      store,
      user_id,
      shipping_address,
      mock_order_latency_ms,
    })
  }
}
