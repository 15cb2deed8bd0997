// tote/src/core/snapshot.rs

//! Immutable views of a collection, published after every change.

use std::ops::Deref;
use std::sync::Arc;

/// A frozen copy of a store's items at one revision.
///
/// Cloning is cheap: clones share the same item buffer. Aggregates such as the
/// cart total are computed from the items on demand, never stored alongside.
#[derive(Debug)]
pub struct Snapshot<T> {
  revision: u64,
  items: Arc<[T]>,
}

impl<T> Snapshot<T> {
  pub(crate) fn new(revision: u64, items: Vec<T>) -> Self {
    Self {
      revision,
      items: items.into(),
    }
  }

  /// Starts at 0 for a freshly hydrated store and increases by one per change.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn items(&self) -> &[T] {
    &self.items
  }
}

impl<T> Clone for Snapshot<T> {
  fn clone(&self) -> Self {
    Self {
      revision: self.revision,
      items: Arc::clone(&self.items),
    }
  }
}

impl<T> Deref for Snapshot<T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    &self.items
  }
}

impl<T> Default for Snapshot<T> {
  fn default() -> Self {
    Self::new(0, Vec::new())
  }
}
