// tote/src/core/collection.rs

//! `PersistentCollection<T>`: the write-through list both stores are built on.
//!
//! Holds the current snapshot behind a `parking_lot::RwLock`, persists every
//! change under its storage key before the mutating call returns, and then
//! publishes the new snapshot to subscribers.
//!
//! Publishing is serialized per collection: a mutation holds the publish lock
//! from the moment its snapshot replaces the old one until every observer has
//! seen it, so observers receive revisions in order. The lock is reentrant,
//! which lets an observer mutate the collection it observes; the nested
//! revision is then delivered first and the outer, older one is dropped.

use crate::config::WriteFailurePolicy;
use crate::core::observer::{Subscribers, SubscriptionId};
use crate::core::snapshot::Snapshot;
use crate::error::ToteResult;
use crate::storage::{load_collection, save_collection, KeyValueStorage};
use parking_lot::{ReentrantMutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{event, Level};

/// What a mutation closure did to the item list.
pub(crate) enum Change<R> {
  /// The list was modified; persist and publish.
  Changed(R),
  /// The list is exactly as before; nothing is written or published.
  Unchanged(R),
}

struct CollectionState<T> {
  snapshot: Snapshot<T>,
  // Set after a failed write under LogAndContinue; no more writes this session.
  memory_only: bool,
}

pub(crate) struct PersistentCollection<T> {
  key: String,
  storage: Arc<dyn KeyValueStorage>,
  policy: WriteFailurePolicy,
  state: RwLock<CollectionState<T>>,
  publish: ReentrantMutex<()>,
  subscribers: Subscribers<T>,
}

impl<T> PersistentCollection<T>
where
  T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
  /// Loads whatever is persisted under `key` and passes it through
  /// `normalize`, which restores the collection's invariants on payloads
  /// written by something else. This is the only read from storage a
  /// collection ever does, and it never writes back.
  pub(crate) fn hydrate(
    key: impl Into<String>,
    storage: Arc<dyn KeyValueStorage>,
    policy: WriteFailurePolicy,
    normalize: impl FnOnce(Vec<T>) -> Vec<T>,
  ) -> Self {
    let key = key.into();
    let loaded: Vec<T> = load_collection(storage.as_ref(), &key);
    let loaded_count = loaded.len();
    let items = normalize(loaded);
    if items.len() != loaded_count {
      event!(
        Level::WARN,
        key = %key,
        loaded = loaded_count,
        kept = items.len(),
        "Persisted collection had invalid or duplicate entries; normalized."
      );
    }
    event!(Level::DEBUG, key = %key, count = items.len(), "Collection hydrated.");
    Self {
      key,
      storage,
      policy,
      state: RwLock::new(CollectionState {
        snapshot: Snapshot::new(0, items),
        memory_only: false,
      }),
      publish: ReentrantMutex::new(()),
      subscribers: Subscribers::new(),
    }
  }

  pub(crate) fn key(&self) -> &str {
    &self.key
  }

  pub(crate) fn snapshot(&self) -> Snapshot<T> {
    self.state.read().snapshot.clone()
  }

  pub(crate) fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
    f(self.state.read().snapshot.items())
  }

  pub(crate) fn is_memory_only(&self) -> bool {
    self.state.read().memory_only
  }

  pub(crate) fn subscribe(&self, observer: impl Fn(&Snapshot<T>) + Send + Sync + 'static) -> SubscriptionId {
    self.subscribers.subscribe(observer)
  }

  pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.subscribers.unsubscribe(id)
  }

  pub(crate) fn subscriber_count(&self) -> usize {
    self.subscribers.len()
  }

  /// Applies `f` to a copy of the items. If it reports a change, the copy
  /// becomes the new snapshot, is written to storage while the lock is still
  /// held (so storage order matches mutation order), and is then published.
  ///
  /// The in-memory change stands even when the write fails; whether the
  /// failure is returned depends on the configured `WriteFailurePolicy`.
  pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Change<R>) -> ToteResult<R> {
    let _publishing = self.publish.lock();
    let (outcome, published, write_result) = {
      let mut state = self.state.write();
      let mut items = state.snapshot.to_vec();
      let outcome = match f(&mut items) {
        Change::Unchanged(outcome) => return Ok(outcome),
        Change::Changed(outcome) => outcome,
      };

      let snapshot = Snapshot::new(state.snapshot.revision() + 1, items);
      state.snapshot = snapshot.clone();

      let write_result = if state.memory_only {
        event!(Level::TRACE, key = %self.key, "Memory-only mode; skipping write.");
        Ok(())
      } else {
        match save_collection(self.storage.as_ref(), &self.key, snapshot.items()) {
          Ok(()) => Ok(()),
          Err(e) => match self.policy {
            WriteFailurePolicy::LogAndContinue => {
              event!(
                Level::ERROR,
                key = %self.key,
                error = %e,
                "Failed to persist collection; continuing in memory for this session."
              );
              state.memory_only = true;
              Ok(())
            }
            WriteFailurePolicy::Propagate => {
              event!(Level::ERROR, key = %self.key, error = %e, "Failed to persist collection.");
              Err(e)
            }
          },
        }
      };
      (outcome, snapshot, write_result)
    };

    self.subscribers.notify(&published);
    write_result.map(|()| outcome)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStorage;

  fn collection(storage: Arc<MemoryStorage>) -> PersistentCollection<u32> {
    PersistentCollection::hydrate("numbers", storage, WriteFailurePolicy::LogAndContinue, |items| items)
  }

  #[test]
  fn changes_are_written_through() {
    let storage = Arc::new(MemoryStorage::new());
    let numbers = collection(Arc::clone(&storage));

    numbers
      .mutate(|items| {
        items.push(7);
        Change::Changed(())
      })
      .unwrap();

    assert_eq!(storage.get_item("numbers").unwrap().as_deref(), Some("[7]"));
    assert_eq!(numbers.snapshot().revision(), 1);
  }

  #[test]
  fn unchanged_mutation_does_not_write_or_bump_revision() {
    let storage = Arc::new(MemoryStorage::new());
    let numbers = collection(Arc::clone(&storage));

    numbers.mutate(|_| Change::Unchanged(())).unwrap();

    assert_eq!(storage.get_item("numbers").unwrap(), None);
    assert_eq!(numbers.snapshot().revision(), 0);
  }

  #[test]
  fn hydrate_applies_normalize_without_writing() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("numbers", "[0,4,0,5]").unwrap();
    let numbers: PersistentCollection<u32> = PersistentCollection::hydrate(
      "numbers",
      storage.clone(),
      WriteFailurePolicy::LogAndContinue,
      |items| items.into_iter().filter(|n| *n != 0).collect(),
    );

    assert_eq!(numbers.read(|items| items.to_vec()), vec![4, 5]);
    assert_eq!(storage.get_item("numbers").unwrap().as_deref(), Some("[0,4,0,5]"));
  }

  #[test]
  fn observer_mutating_its_own_collection_sees_latest_revision_last() {
    let numbers = Arc::new(collection(Arc::new(MemoryStorage::new())));
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let nested = Arc::clone(&numbers);
    numbers.subscribe(move |snapshot| {
      if snapshot.revision() == 1 {
        nested
          .mutate(|items| {
            items.push(2);
            Change::Changed(())
          })
          .unwrap();
      }
    });
    let recorder = Arc::clone(&seen);
    numbers.subscribe(move |snapshot| recorder.lock().push(snapshot.revision()));

    numbers
      .mutate(|items| {
        items.push(1);
        Change::Changed(())
      })
      .unwrap();

    assert_eq!(numbers.snapshot().revision(), 2);
    assert_eq!(*seen.lock(), vec![2]);
  }

  #[test]
  fn hydrate_reads_existing_payload() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("numbers", "[1,2,3]").unwrap();
    let numbers = collection(storage);
    assert_eq!(numbers.read(|items| items.to_vec()), vec![1, 2, 3]);
    assert_eq!(numbers.key(), "numbers");
  }
}
