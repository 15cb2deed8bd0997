// tote/src/storage/mod.rs

//! String-keyed persistent storage the stores write through to, and the JSON
//! load/save helpers shared by both stores.
//!
//! Backends only move strings; the stores decide what goes in them. Each
//! collection lives under its own key as a JSON array.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{ToteError, ToteResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{event, Level};

/// Durable client-side key/value storage.
///
/// Implementations must be safe to share between the cart and the wishlist;
/// each store only ever touches its own key.
pub trait KeyValueStorage: Send + Sync {
  /// Returns `Ok(None)` when nothing is stored under `key`.
  fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

  fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

  /// Removing a missing key is not an error.
  fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

/// Reads the collection stored under `key`.
///
/// Never fails: a missing key, an unreadable backend and a payload that does
/// not parse all hydrate as an empty collection.
pub fn load_collection<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Vec<T> {
  let raw = match storage.get_item(key) {
    Ok(Some(raw)) => raw,
    Ok(None) => {
      event!(Level::DEBUG, key, "Nothing persisted yet; starting empty.");
      return Vec::new();
    }
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Failed to read persisted collection; starting empty.");
      return Vec::new();
    }
  };

  match serde_json::from_str::<Vec<T>>(&raw) {
    Ok(items) => {
      event!(Level::DEBUG, key, count = items.len(), "Hydrated collection from storage.");
      items
    }
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Persisted collection is malformed; treating as empty.");
      Vec::new()
    }
  }
}

/// Serializes `items` and writes them under `key`.
pub fn save_collection<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, items: &[T]) -> ToteResult<()> {
  let raw = serde_json::to_string(items)?;
  storage
    .set_item(key, &raw)
    .map_err(|source| ToteError::storage(key, source))
}
