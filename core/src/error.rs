// tote/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToteError {
  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Failed to serialize collection: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Cannot check out an empty cart")]
  EmptyCart,

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Order gateway failed. Source: {source}")]
  Gateway {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error: {0}")]
  Config(String),
}

impl ToteError {
  pub(crate) fn storage(key: &str, source: impl Into<AnyhowError>) -> Self {
    ToteError::Storage {
      key: key.to_string(),
      source: source.into(),
    }
  }
}

// Gateway implementations return anyhow errors; a ToteError that was already
// boxed inside one is unwrapped instead of being nested.
impl From<AnyhowError> for ToteError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<ToteError>() {
      Ok(tote_err) => tote_err,
      Err(err) => ToteError::Gateway { source: err },
    }
  }
}

pub type ToteResult<T, E = ToteError> = std::result::Result<T, E>;
