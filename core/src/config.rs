// tote/src/config.rs

//! Store configuration: storage keys and what to do when a write-through fails.

use crate::error::{ToteError, ToteResult};
use std::str::FromStr;

/// Storage key the cart collection is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";
/// Storage key the wishlist collection is persisted under.
pub const DEFAULT_WISHLIST_KEY: &str = "wishlist";

/// Behaviour of a store when writing its collection to storage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFailurePolicy {
  /// Log the failure, keep the mutation in memory, and stop persisting for the
  /// rest of the session. The mutating call still returns `Ok`.
  #[default]
  LogAndContinue,
  /// Keep the mutation in memory but return `ToteError::Storage` to the caller.
  Propagate,
}

impl FromStr for WriteFailurePolicy {
  type Err = ToteError;

  fn from_str(s: &str) -> ToteResult<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "log" | "log_and_continue" | "log-and-continue" => Ok(WriteFailurePolicy::LogAndContinue),
      "propagate" | "error" => Ok(WriteFailurePolicy::Propagate),
      other => Err(ToteError::Config(format!("Unknown write failure policy '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
  pub cart_key: String,
  pub wishlist_key: String,
  pub write_failure_policy: WriteFailurePolicy,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      cart_key: DEFAULT_CART_KEY.to_string(),
      wishlist_key: DEFAULT_WISHLIST_KEY.to_string(),
      write_failure_policy: WriteFailurePolicy::default(),
    }
  }
}

impl StoreConfig {
  pub fn with_policy(mut self, policy: WriteFailurePolicy) -> Self {
    self.write_failure_policy = policy;
    self
  }

  /// Rejects configurations where both stores would overwrite each other.
  pub fn validate(&self) -> ToteResult<()> {
    if self.cart_key.trim().is_empty() || self.wishlist_key.trim().is_empty() {
      return Err(ToteError::Config("Storage keys must not be empty".to_string()));
    }
    if self.cart_key == self.wishlist_key {
      return Err(ToteError::Config(format!(
        "Cart and wishlist cannot share the storage key '{}'",
        self.cart_key
      )));
    }
    Ok(())
  }
}
