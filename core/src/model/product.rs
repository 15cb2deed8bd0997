// tote/src/model/product.rs

use super::{CartLineItem, WishlistItem};
use serde::{Deserialize, Serialize};

/// The part of a catalog product that pages copy into the cart or wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
  pub product_id: i64,
  pub name: String,
  pub price: f64,
  pub image: String,
}

impl ProductSnapshot {
  pub fn new(product_id: i64, name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
    Self {
      product_id,
      name: name.into(),
      price,
      image: image.into(),
    }
  }

  pub fn to_cart_item(&self, quantity: u32, variant: Option<String>) -> CartLineItem {
    CartLineItem {
      product_id: self.product_id,
      name: self.name.clone(),
      price: self.price,
      image: self.image.clone(),
      quantity,
      variant,
    }
  }

  pub fn to_wishlist_item(&self) -> WishlistItem {
    WishlistItem {
      product_id: self.product_id,
      name: self.name.clone(),
      price: self.price,
      image: self.image.clone(),
    }
  }
}

impl From<&WishlistItem> for ProductSnapshot {
  fn from(item: &WishlistItem) -> Self {
    Self {
      product_id: item.product_id,
      name: item.name.clone(),
      price: item.price,
      image: item.image.clone(),
    }
  }
}
