// tote/src/wishlist.rs

//! The wishlist store: saved products, unique by product id.

use crate::config::StoreConfig;
use crate::core::collection::{Change, PersistentCollection};
use crate::core::observer::SubscriptionId;
use crate::core::snapshot::Snapshot;
use crate::error::ToteResult;
use crate::model::WishlistItem;
use crate::storage::KeyValueStorage;
use std::sync::Arc;
use tracing::instrument;

pub type WishlistSnapshot = Snapshot<WishlistItem>;

pub struct WishlistStore {
  entries: PersistentCollection<WishlistItem>,
}

impl WishlistStore {
  pub fn open(storage: Arc<dyn KeyValueStorage>, config: &StoreConfig) -> Self {
    Self {
      entries: PersistentCollection::hydrate(
        config.wishlist_key.clone(),
        storage,
        config.write_failure_policy,
        dedup_entries,
      ),
    }
  }

  /// Appends `item` unless its product is already saved. Returns whether it was added.
  #[instrument(name = "WishlistStore::add_to_wishlist", skip_all, fields(product_id = item.product_id))]
  pub fn add_to_wishlist(&self, item: WishlistItem) -> ToteResult<bool> {
    self.entries.mutate(|entries| {
      if entries.iter().any(|e| e.product_id == item.product_id) {
        return Change::Unchanged(false);
      }
      entries.push(item);
      Change::Changed(true)
    })
  }

  #[instrument(name = "WishlistStore::remove_from_wishlist", skip(self))]
  pub fn remove_from_wishlist(&self, product_id: i64) -> ToteResult<bool> {
    self.entries.mutate(|entries| {
      let before = entries.len();
      entries.retain(|e| e.product_id != product_id);
      if entries.len() == before {
        Change::Unchanged(false)
      } else {
        Change::Changed(true)
      }
    })
  }

  /// Removes the product if saved, saves it otherwise. Returns whether the
  /// product is in the wishlist afterwards.
  #[instrument(name = "WishlistStore::toggle_wishlist", skip_all, fields(product_id = item.product_id))]
  pub fn toggle_wishlist(&self, item: WishlistItem) -> ToteResult<bool> {
    self.entries.mutate(|entries| {
      match entries.iter().position(|e| e.product_id == item.product_id) {
        Some(index) => {
          entries.remove(index);
          Change::Changed(false)
        }
        None => {
          entries.push(item);
          Change::Changed(true)
        }
      }
    })
  }

  pub fn is_in_wishlist(&self, product_id: i64) -> bool {
    self.entries.read(|entries| entries.iter().any(|e| e.product_id == product_id))
  }

  #[instrument(name = "WishlistStore::clear_wishlist", skip(self))]
  pub fn clear_wishlist(&self) -> ToteResult<()> {
    self.entries.mutate(|entries| {
      if entries.is_empty() {
        return Change::Unchanged(());
      }
      entries.clear();
      Change::Changed(())
    })
  }

  pub fn get(&self, product_id: i64) -> Option<WishlistItem> {
    self
      .entries
      .read(|entries| entries.iter().find(|e| e.product_id == product_id).cloned())
  }

  pub fn items(&self) -> WishlistSnapshot {
    self.entries.snapshot()
  }

  pub fn len(&self) -> usize {
    self.entries.read(<[WishlistItem]>::len)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read(<[WishlistItem]>::is_empty)
  }

  pub fn subscribe(&self, observer: impl Fn(&WishlistSnapshot) + Send + Sync + 'static) -> SubscriptionId {
    self.entries.subscribe(observer)
  }

  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.entries.unsubscribe(id)
  }

  pub fn subscriber_count(&self) -> usize {
    self.entries.subscriber_count()
  }

  pub fn is_memory_only(&self) -> bool {
    self.entries.is_memory_only()
  }

  pub fn storage_key(&self) -> &str {
    self.entries.key()
  }
}

/// Keeps the first entry for each product.
fn dedup_entries(loaded: Vec<WishlistItem>) -> Vec<WishlistItem> {
  let mut entries: Vec<WishlistItem> = Vec::with_capacity(loaded.len());
  for entry in loaded {
    if !entries.iter().any(|kept| kept.product_id == entry.product_id) {
      entries.push(entry);
    }
  }
  entries
}

impl std::fmt::Debug for WishlistStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WishlistStore")
      .field("key", &self.storage_key())
      .field("entries", &self.len())
      .field("memory_only", &self.is_memory_only())
      .finish()
  }
}
