// tote/src/cart.rs

//! The cart store: line items keyed by `(product_id, variant)`, merged on add,
//! removed when their quantity reaches zero, persisted under the cart key.

use crate::config::StoreConfig;
use crate::core::collection::{Change, PersistentCollection};
use crate::core::observer::SubscriptionId;
use crate::core::snapshot::Snapshot;
use crate::error::ToteResult;
use crate::model::CartLineItem;
use crate::storage::KeyValueStorage;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub type CartSnapshot = Snapshot<CartLineItem>;

impl Snapshot<CartLineItem> {
  /// Sum of `price × quantity` over all lines. No rounding is applied.
  pub fn total(&self) -> f64 {
    self.iter().map(CartLineItem::line_total).sum()
  }

  /// Sum of quantities, not the number of distinct lines.
  pub fn count(&self) -> u64 {
    self.iter().map(|line| u64::from(line.quantity)).sum()
  }
}

pub struct CartStore {
  lines: PersistentCollection<CartLineItem>,
}

impl CartStore {
  /// Opens the cart persisted under `config.cart_key`, hydrating it once.
  pub fn open(storage: Arc<dyn KeyValueStorage>, config: &StoreConfig) -> Self {
    Self {
      lines: PersistentCollection::hydrate(
        config.cart_key.clone(),
        storage,
        config.write_failure_policy,
        normalize_lines,
      ),
    }
  }

  /// Adds `item`, merging into an existing line with the same product and variant.
  ///
  /// Items are expected to carry `quantity >= 1`; a zero-quantity item is
  /// ignored rather than stored as an empty line.
  #[instrument(
    name = "CartStore::add_to_cart",
    skip_all,
    fields(product_id = item.product_id, variant = ?item.variant, quantity = item.quantity)
  )]
  pub fn add_to_cart(&self, item: CartLineItem) -> ToteResult<()> {
    if item.quantity == 0 {
      event!(Level::WARN, "Ignoring add of a zero-quantity item.");
      return Ok(());
    }
    self.lines.mutate(|lines| {
      match lines
        .iter_mut()
        .find(|line| line.matches(item.product_id, item.variant.as_deref()))
      {
        Some(existing) => {
          existing.quantity = existing.quantity.saturating_add(item.quantity);
          event!(Level::DEBUG, quantity = existing.quantity, "Merged into existing line.");
        }
        None => {
          event!(Level::DEBUG, "Appended new line.");
          lines.push(item);
        }
      }
      Change::Changed(())
    })
  }

  /// Removes the line matching `(product_id, variant)` exactly. Returns whether
  /// a line was removed.
  #[instrument(name = "CartStore::remove_from_cart", skip(self))]
  pub fn remove_from_cart(&self, product_id: i64, variant: Option<&str>) -> ToteResult<bool> {
    self.lines.mutate(|lines| {
      let before = lines.len();
      lines.retain(|line| !line.matches(product_id, variant));
      if lines.len() == before {
        Change::Unchanged(false)
      } else {
        Change::Changed(true)
      }
    })
  }

  /// Sets the matching line's quantity to `max(0, quantity)`; a resulting zero
  /// removes the line. Does nothing if no line matches.
  #[instrument(name = "CartStore::update_quantity", skip(self))]
  pub fn update_quantity(&self, product_id: i64, quantity: i64, variant: Option<&str>) -> ToteResult<()> {
    let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    self.lines.mutate(|lines| {
      let Some(index) = lines.iter().position(|line| line.matches(product_id, variant)) else {
        return Change::Unchanged(());
      };
      if clamped == 0 {
        event!(Level::DEBUG, "Quantity dropped to zero; removing line.");
        lines.remove(index);
        return Change::Changed(());
      }
      if lines[index].quantity == clamped {
        return Change::Unchanged(());
      }
      lines[index].quantity = clamped;
      Change::Changed(())
    })
  }

  #[instrument(name = "CartStore::clear_cart", skip(self))]
  pub fn clear_cart(&self) -> ToteResult<()> {
    self.lines.mutate(|lines| {
      if lines.is_empty() {
        return Change::Unchanged(());
      }
      lines.clear();
      Change::Changed(())
    })
  }

  pub fn cart_total(&self) -> f64 {
    self.lines.read(|lines| lines.iter().map(CartLineItem::line_total).sum())
  }

  pub fn cart_count(&self) -> u64 {
    self.lines.read(|lines| lines.iter().map(|line| u64::from(line.quantity)).sum())
  }

  /// The current lines in insertion order.
  pub fn items(&self) -> CartSnapshot {
    self.lines.snapshot()
  }

  pub fn line(&self, product_id: i64, variant: Option<&str>) -> Option<CartLineItem> {
    self
      .lines
      .read(|lines| lines.iter().find(|line| line.matches(product_id, variant)).cloned())
  }

  pub fn len(&self) -> usize {
    self.lines.read(<[CartLineItem]>::len)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.read(<[CartLineItem]>::is_empty)
  }

  /// Registers `observer` to receive every snapshot published after a change.
  pub fn subscribe(&self, observer: impl Fn(&CartSnapshot) + Send + Sync + 'static) -> SubscriptionId {
    self.lines.subscribe(observer)
  }

  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.lines.unsubscribe(id)
  }

  pub fn subscriber_count(&self) -> usize {
    self.lines.subscriber_count()
  }

  /// True once a failed write has switched the cart to memory-only mode.
  pub fn is_memory_only(&self) -> bool {
    self.lines.is_memory_only()
  }

  pub fn storage_key(&self) -> &str {
    self.lines.key()
  }
}

/// Drops zero-quantity lines and merges lines sharing a key into the first
/// one, keeping first-seen order.
fn normalize_lines(loaded: Vec<CartLineItem>) -> Vec<CartLineItem> {
  let mut lines: Vec<CartLineItem> = Vec::with_capacity(loaded.len());
  for line in loaded {
    if line.quantity == 0 {
      continue;
    }
    match lines.iter_mut().find(|kept| kept.key() == line.key()) {
      Some(kept) => kept.quantity = kept.quantity.saturating_add(line.quantity),
      None => lines.push(line),
    }
  }
  lines
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("key", &self.storage_key())
      .field("lines", &self.len())
      .field("memory_only", &self.is_memory_only())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStorage;

  fn cart() -> CartStore {
    CartStore::open(Arc::new(MemoryStorage::new()), &StoreConfig::default())
  }

  fn item(product_id: i64, price: f64, quantity: u32, variant: Option<&str>) -> CartLineItem {
    CartLineItem {
      product_id,
      name: format!("Product {}", product_id),
      price,
      image: "x".to_string(),
      quantity,
      variant: variant.map(str::to_string),
    }
  }

  #[test]
  fn same_key_merges_quantities() {
    let cart = cart();
    cart.add_to_cart(item(1, 300.0, 2, None)).unwrap();
    cart.add_to_cart(item(1, 300.0, 3, None)).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(1, None).unwrap().quantity, 5);
    assert_eq!(cart.cart_total(), 1500.0);
    assert_eq!(cart.cart_count(), 5);
  }

  #[test]
  fn different_variants_are_separate_lines() {
    let cart = cart();
    cart.add_to_cart(item(1, 300.0, 1, Some("M"))).unwrap();
    cart.add_to_cart(item(1, 300.0, 1, Some("L"))).unwrap();
    cart.add_to_cart(item(1, 300.0, 1, None)).unwrap();

    assert_eq!(cart.len(), 3);
    assert_eq!(cart.cart_count(), 3);
  }

  #[test]
  fn negative_quantity_removes_line() {
    let cart = cart();
    cart.add_to_cart(item(1, 300.0, 2, None)).unwrap();
    cart.update_quantity(1, -5, None).unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.cart_count(), 0);
  }

  #[test]
  fn update_quantity_sets_rather_than_adds() {
    let cart = cart();
    cart.add_to_cart(item(1, 10.0, 2, Some("M"))).unwrap();
    cart.update_quantity(1, 7, Some("M")).unwrap();
    assert_eq!(cart.line(1, Some("M")).unwrap().quantity, 7);
    assert_eq!(cart.cart_total(), 70.0);
  }

  #[test]
  fn variant_must_match_for_remove_and_update() {
    let cart = cart();
    cart.add_to_cart(item(1, 10.0, 2, Some("M"))).unwrap();

    assert!(!cart.remove_from_cart(1, None).unwrap());
    cart.update_quantity(1, 0, Some("L")).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items().revision(), 1);

    assert!(cart.remove_from_cart(1, Some("M")).unwrap());
    assert!(cart.is_empty());
  }

  #[test]
  fn zero_quantity_add_is_ignored() {
    let cart = cart();
    cart.add_to_cart(item(1, 10.0, 0, None)).unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.items().revision(), 0);
  }

  #[test]
  fn snapshot_aggregates_match_store() {
    let cart = cart();
    cart.add_to_cart(item(1, 2.5, 4, None)).unwrap();
    cart.add_to_cart(item(2, 1.25, 2, Some("S"))).unwrap();

    let snapshot = cart.items();
    assert_eq!(snapshot.total(), cart.cart_total());
    assert_eq!(snapshot.count(), cart.cart_count());
    assert_eq!(snapshot.total(), 12.5);
    assert_eq!(snapshot.count(), 6);
  }

  #[test]
  fn merges_saturate_at_the_quantity_limit() {
    let cart = cart();
    cart.add_to_cart(item(1, 1.0, u32::MAX - 1, None)).unwrap();
    cart.add_to_cart(item(1, 1.0, 5, None)).unwrap();
    assert_eq!(cart.line(1, None).unwrap().quantity, u32::MAX);
    assert_eq!(cart.cart_count(), u64::from(u32::MAX));
  }

  #[test]
  fn oversized_update_is_clamped() {
    let cart = cart();
    cart.add_to_cart(item(1, 1.0, 1, Some("M"))).unwrap();
    cart.update_quantity(1, i64::from(u32::MAX) + 10, Some("M")).unwrap();
    assert_eq!(cart.line(1, Some("M")).unwrap().quantity, u32::MAX);
  }

  #[test]
  fn normalize_drops_empty_lines_and_merges_duplicate_keys() {
    let lines = normalize_lines(vec![
      item(1, 10.0, 0, None),
      item(2, 5.0, 1, Some("M")),
      item(3, 1.0, 2, None),
      item(2, 5.0, 3, Some("M")),
      item(2, 5.0, 1, None),
    ]);

    let keys: Vec<(i64, Option<&str>, u32)> = lines
      .iter()
      .map(|line| (line.product_id, line.variant.as_deref(), line.quantity))
      .collect();
    assert_eq!(keys, vec![(2, Some("M"), 4), (3, None, 2), (2, None, 1)]);
  }

  #[test]
  fn clear_empties_cart() {
    let cart = cart();
    cart.add_to_cart(item(1, 10.0, 1, None)).unwrap();
    cart.add_to_cart(item(2, 10.0, 1, None)).unwrap();
    cart.clear_cart().unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.cart_total(), 0.0);
  }
}
