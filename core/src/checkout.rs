// tote/src/checkout.rs

//! Turning the cart into an order payload, and the seam to the remote order service.
//!
//! The stores never talk to the backend. Checkout builds an [`OrderDraft`]
//! from a cart snapshot and hands it to whatever [`OrderGateway`] the
//! application injects; the session clears the cart only once the gateway
//! has accepted the order.

use crate::cart::CartSnapshot;
use crate::error::{ToteError, ToteResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraftItem {
  pub product_id: i64,
  pub quantity: u32,
  pub price: f64,
  pub variant_info: Option<String>,
}

/// The order body sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
  /// Client-side reference, unique per draft.
  pub reference: Uuid,
  pub user_id: String,
  pub total_amount: f64,
  pub shipping_address: String,
  pub items: Vec<OrderDraftItem>,
  pub created_at: DateTime<Utc>,
}

impl OrderDraft {
  /// Builds a draft from `cart`. Fails on an empty cart, a blank user id or a blank address.
  pub fn from_cart(cart: &CartSnapshot, user_id: &str, shipping_address: &str) -> ToteResult<Self> {
    if cart.is_empty() {
      return Err(ToteError::EmptyCart);
    }
    let user_id = user_id.trim();
    if user_id.is_empty() {
      return Err(ToteError::Validation("A signed-in user is required to check out".to_string()));
    }
    let shipping_address = shipping_address.trim();
    if shipping_address.is_empty() {
      return Err(ToteError::Validation("Shipping address is required".to_string()));
    }

    let items = cart
      .iter()
      .map(|line| OrderDraftItem {
        product_id: line.product_id,
        quantity: line.quantity,
        price: line.price,
        variant_info: line.variant.clone(),
      })
      .collect();

    Ok(Self {
      reference: Uuid::new_v4(),
      user_id: user_id.to_string(),
      total_amount: cart.total(),
      shipping_address: shipping_address.to_string(),
      items,
      created_at: Utc::now(),
    })
  }

  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity)).sum()
  }
}

/// What the order service answers once it has stored an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
  pub order_id: String,
  pub status: String,
}

/// The remote order service, as seen from the storefront.
#[async_trait]
pub trait OrderGateway: Send + Sync {
  /// Submits `draft`. Any error means the order was not placed.
  async fn submit_order(&self, draft: &OrderDraft) -> anyhow::Result<OrderReceipt>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::snapshot::Snapshot;
  use crate::model::CartLineItem;

  fn cart() -> CartSnapshot {
    Snapshot::new(
      3,
      vec![
        CartLineItem {
          product_id: 1,
          name: "Tee".to_string(),
          price: 300.0,
          image: "x".to_string(),
          quantity: 2,
          variant: Some("Size: M, Color: Red".to_string()),
        },
        CartLineItem {
          product_id: 2,
          name: "Cargo".to_string(),
          price: 50.5,
          image: "y".to_string(),
          quantity: 1,
          variant: None,
        },
      ],
    )
  }

  #[test]
  fn draft_mirrors_cart_lines() {
    let draft = OrderDraft::from_cart(&cart(), "user-1", "  12 Park Street  ").unwrap();
    assert_eq!(draft.total_amount, 650.5);
    assert_eq!(draft.shipping_address, "12 Park Street");
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items[0].variant_info.as_deref(), Some("Size: M, Color: Red"));
    assert_eq!(draft.items[1].variant_info, None);
    assert_eq!(draft.item_count(), 3);
  }

  #[test]
  fn draft_serializes_with_snake_case_fields() {
    let draft = OrderDraft::from_cart(&cart(), "user-1", "addr").unwrap();
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["user_id"], "user-1");
    assert_eq!(json["shipping_address"], "addr");
    assert_eq!(json["items"][0]["product_id"], 1);
    assert_eq!(json["items"][0]["variant_info"], "Size: M, Color: Red");
  }

  #[test]
  fn preconditions_are_checked() {
    let empty: CartSnapshot = Snapshot::default();
    assert!(matches!(OrderDraft::from_cart(&empty, "u", "addr"), Err(ToteError::EmptyCart)));
    assert!(matches!(OrderDraft::from_cart(&cart(), "u", "   "), Err(ToteError::Validation(_))));
    assert!(matches!(OrderDraft::from_cart(&cart(), "", "addr"), Err(ToteError::Validation(_))));
  }
}
