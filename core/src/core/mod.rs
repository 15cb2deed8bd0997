pub(crate) mod collection;
pub mod observer;
pub mod snapshot;

// Re-export key types for easier access from other modules (and lib.rs)
pub use observer::{Observer, SubscriptionId};
pub use snapshot::Snapshot;
