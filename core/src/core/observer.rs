// tote/src/core/observer.rs

//! Subscription list used by the stores to tell views that a new snapshot exists.

use crate::core::snapshot::Snapshot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

/// Callback invoked with every snapshot a store publishes.
///
/// Observers run synchronously on the thread that performed the mutation,
/// after the store has released its own lock, so they may read the store or
/// (un)subscribe from inside the callback.
pub type Observer<T> = Arc<dyn Fn(&Snapshot<T>) + Send + Sync + 'static>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) struct Subscribers<T> {
  next_id: AtomicU64,
  // Highest revision handed to observers so far.
  last_published: AtomicU64,
  observers: Mutex<Vec<(SubscriptionId, Observer<T>)>>,
}

impl<T> Subscribers<T> {
  pub(crate) fn new() -> Self {
    Self {
      next_id: AtomicU64::new(1),
      last_published: AtomicU64::new(0),
      observers: Mutex::new(Vec::new()),
    }
  }

  pub(crate) fn subscribe(&self, observer: impl Fn(&Snapshot<T>) + Send + Sync + 'static) -> SubscriptionId {
    let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.observers.lock().push((id, Arc::new(observer)));
    event!(Level::TRACE, subscription = id.0, "Observer subscribed.");
    id
  }

  pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
    let mut observers = self.observers.lock();
    let before = observers.len();
    observers.retain(|(existing, _)| *existing != id);
    before != observers.len()
  }

  pub(crate) fn len(&self) -> usize {
    self.observers.lock().len()
  }

  /// Calls every observer registered at the time of the call, in subscription order.
  ///
  /// Callers serialize `notify` per collection. A snapshot older than one
  /// already published is dropped, and delivery of a snapshot stops as soon
  /// as a newer one has gone out from inside an observer.
  pub(crate) fn notify(&self, snapshot: &Snapshot<T>) {
    let revision = snapshot.revision();
    if self.last_published.fetch_max(revision, Ordering::SeqCst) > revision {
      event!(Level::DEBUG, revision, "Dropping stale snapshot.");
      return;
    }
    // Copy the list so callbacks run without holding the mutex.
    let observers: Vec<Observer<T>> = self.observers.lock().iter().map(|(_, o)| Arc::clone(o)).collect();
    event!(
      Level::TRACE,
      revision = snapshot.revision(),
      observers = observers.len(),
      "Publishing snapshot."
    );
    for observer in observers {
      if self.last_published.load(Ordering::SeqCst) > revision {
        event!(Level::DEBUG, revision, "Newer snapshot already published; stopping delivery.");
        break;
      }
      observer(snapshot);
    }
  }
}
