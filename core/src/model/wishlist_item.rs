// tote/src/model/wishlist_item.rs

use serde::{Deserialize, Serialize};

/// A saved-for-later product. Unique by `product_id` within a wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
  pub product_id: i64,
  pub name: String,
  pub price: f64,
  pub image: String,
}
