// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tote::{CartLineItem, KeyValueStorage, OrderDraft, OrderGateway, OrderReceipt, WishlistItem};
use tracing::Level;

// --- Item builders ---
pub fn line(product_id: i64, price: f64, quantity: u32, variant: Option<&str>) -> CartLineItem {
  CartLineItem {
    product_id,
    name: format!("Product {}", product_id),
    price,
    image: format!("https://img.example/{}.jpg", product_id),
    quantity,
    variant: variant.map(str::to_string),
  }
}

pub fn tee(quantity: u32, variant: Option<&str>) -> CartLineItem {
  CartLineItem {
    product_id: 1,
    name: "Tee".to_string(),
    price: 300.0,
    image: "x".to_string(),
    quantity,
    variant: variant.map(str::to_string),
  }
}

pub fn saved(product_id: i64, price: f64) -> WishlistItem {
  WishlistItem {
    product_id,
    name: format!("Product {}", product_id),
    price,
    image: format!("https://img.example/{}.jpg", product_id),
  }
}

// --- Storage that can be told to fail ---

/// In-memory storage whose writes start failing once `fail_writes` is set.
#[derive(Default)]
pub struct FlakyStorage {
  entries: Mutex<HashMap<String, String>>,
  fail_writes: AtomicBool,
  pub writes: AtomicUsize,
}

impl FlakyStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.entries.lock().get(key).cloned()
  }
}

impl KeyValueStorage for FlakyStorage {
  fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(anyhow!("quota exceeded writing '{}'", key));
    }
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(&self, key: &str) -> anyhow::Result<()> {
    self.entries.lock().remove(key);
    Ok(())
  }
}

// --- Order gateway double ---

/// Records every draft it receives; rejects them while `reject` is set.
#[derive(Default)]
pub struct RecordingGateway {
  pub received: Mutex<Vec<OrderDraft>>,
  reject: AtomicBool,
}

impl RecordingGateway {
  pub fn rejecting() -> Self {
    let gateway = Self::default();
    gateway.reject.store(true, Ordering::SeqCst);
    gateway
  }
}

#[async_trait]
impl OrderGateway for RecordingGateway {
  async fn submit_order(&self, draft: &OrderDraft) -> anyhow::Result<OrderReceipt> {
    tokio::time::sleep(std::time::Duration::from_millis(1)).await; // Simulate network latency
    self.received.lock().push(draft.clone());
    if self.reject.load(Ordering::SeqCst) {
      return Err(anyhow!("Network response was not ok"));
    }
    Ok(OrderReceipt {
      order_id: format!("order-{}", draft.reference.simple()),
      status: "pending".to_string(),
    })
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for observer notifications ---
pub static NOTIFICATIONS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_notifications() {
  NOTIFICATIONS.store(0, Ordering::SeqCst);
}

pub fn notifications() -> usize {
  NOTIFICATIONS.load(Ordering::SeqCst)
}
