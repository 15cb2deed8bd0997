// demos/storefront_app/src/errors.rs

use thiserror::Error;
use tote::ToteError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {source}")]
  Store {
    #[from] // Allows conversion from tote::ToteError
    source: ToteError,
  },

  #[error("Internal Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl AppError {
  /// Message shown to the shopper, as opposed to the full error chain in the logs.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Store { source } => match source {
        ToteError::EmptyCart => "Your cart is empty.".to_string(),
        ToteError::Validation(m) => m.clone(),
        ToteError::Gateway { .. } => "Error placing order. Please try again.".to_string(),
        _ => "Something went wrong saving your bag.".to_string(),
      },
      AppError::Validation(m) | AppError::NotFound(m) => m.clone(),
      AppError::Config(_) | AppError::Internal(_) => "An internal error occurred.".to_string(),
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<ToteError>() {
      Ok(source) => AppError::Store { source },
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
