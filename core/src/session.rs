// tote/src/session.rs

//! Defines `StorefrontSession`, the one shared handle per application session.
//!
//! A session owns exactly one cart and one wishlist over one storage backend.
//! Views receive clones of the handle; every clone points at the same stores,
//! so all of them observe the same collections after each mutation.

use crate::cart::CartStore;
use crate::checkout::{OrderDraft, OrderGateway, OrderReceipt};
use crate::config::StoreConfig;
use crate::error::{ToteError, ToteResult};
use crate::model::ProductSnapshot;
use crate::storage::KeyValueStorage;
use crate::wishlist::WishlistStore;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone)]
pub struct StorefrontSession {
  cart: Arc<CartStore>,
  wishlist: Arc<WishlistStore>,
}

impl StorefrontSession {
  /// Validates `config` and hydrates both stores from `storage`.
  #[instrument(name = "StorefrontSession::open", skip_all, fields(cart_key = %config.cart_key, wishlist_key = %config.wishlist_key))]
  pub fn open(storage: Arc<dyn KeyValueStorage>, config: StoreConfig) -> ToteResult<Self> {
    config.validate()?;
    let cart = Arc::new(CartStore::open(Arc::clone(&storage), &config));
    let wishlist = Arc::new(WishlistStore::open(storage, &config));
    event!(
      Level::INFO,
      cart_lines = cart.len(),
      wishlist_entries = wishlist.len(),
      "Storefront session opened."
    );
    Ok(Self { cart, wishlist })
  }

  pub fn cart(&self) -> &CartStore {
    &self.cart
  }

  pub fn wishlist(&self) -> &WishlistStore {
    &self.wishlist
  }

  /// Moves a saved product into the cart as a single, variant-less line.
  /// Returns `false` if the product is not in the wishlist.
  ///
  /// Both halves of the move are always applied in memory. Under
  /// `WriteFailurePolicy::Propagate` a failed write of either store is
  /// returned afterwards (the cart's first), with the move already done.
  #[instrument(name = "StorefrontSession::move_to_cart", skip(self))]
  pub fn move_to_cart(&self, product_id: i64) -> ToteResult<bool> {
    let Some(saved) = self.wishlist.get(product_id) else {
      event!(Level::DEBUG, "Product not in wishlist; nothing to move.");
      return Ok(false);
    };
    let added = self.cart.add_to_cart(ProductSnapshot::from(&saved).to_cart_item(1, None));
    let removed = self.wishlist.remove_from_wishlist(product_id);
    added?;
    removed?;
    Ok(true)
  }

  /// Builds the order payload for the current cart.
  pub fn checkout_draft(&self, user_id: &str, shipping_address: &str) -> ToteResult<OrderDraft> {
    OrderDraft::from_cart(&self.cart.items(), user_id, shipping_address)
  }

  /// Submits the current cart through `gateway`. The cart is cleared only
  /// after the gateway accepts the order; on failure it is left as it was.
  ///
  /// Once the gateway has accepted, the receipt is always returned: a failure
  /// to persist the emptied cart is logged, and the cart stays empty in memory.
  #[instrument(name = "StorefrontSession::place_order", skip(self, gateway, shipping_address), err(Display))]
  pub async fn place_order(
    &self,
    gateway: &dyn OrderGateway,
    user_id: &str,
    shipping_address: &str,
  ) -> ToteResult<OrderReceipt> {
    let draft = self.checkout_draft(user_id, shipping_address)?;
    event!(
      Level::INFO,
      reference = %draft.reference,
      total = draft.total_amount,
      lines = draft.items.len(),
      "Submitting order."
    );

    let receipt = gateway
      .submit_order(&draft)
      .await
      .map_err(ToteError::from)?;

    event!(Level::INFO, order_id = %receipt.order_id, status = %receipt.status, "Order accepted; clearing cart.");
    if let Err(e) = self.cart.clear_cart() {
      event!(
        Level::ERROR,
        order_id = %receipt.order_id,
        error = %e,
        "Order placed but the emptied cart could not be persisted."
      );
    }
    Ok(receipt)
  }
}
