// tote/src/model/cart_item.rs

use serde::{Deserialize, Serialize};

/// A line in the cart. `name`, `image` and `price` are captured when the
/// product is added and are not refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  pub product_id: i64,
  pub name: String,
  pub price: f64,
  pub image: String,
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub variant: Option<String>, // e.g. "Size: M, Color: Red"
}

impl CartLineItem {
  /// `(product_id, variant)` identity: both absent variants match, any two
  /// different strings do not.
  pub fn matches(&self, product_id: i64, variant: Option<&str>) -> bool {
    self.product_id == product_id && self.variant.as_deref() == variant
  }

  pub fn key(&self) -> LineKey<'_> {
    LineKey {
      product_id: self.product_id,
      variant: self.variant.as_deref(),
    }
  }

  pub fn line_total(&self) -> f64 {
    self.price * f64::from(self.quantity)
  }
}

/// Borrowed identity key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
  pub product_id: i64,
  pub variant: Option<&'a str>,
}
