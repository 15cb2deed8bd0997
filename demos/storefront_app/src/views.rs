// demos/storefront_app/src/views.rs

//! Console stand-ins for the pages that react to cart and wishlist changes.

use crate::catalog::{self, Tag};
use crate::errors::{AppError, Result as AppResult};
use tote::{format_amount, StorefrontSession, SubscriptionId};
use tracing::info;

/// Handles returned by [`mount`]; dropping them does not unsubscribe.
pub struct MountedViews {
  session: StorefrontSession,
  cart_ids: Vec<SubscriptionId>,
  wishlist_ids: Vec<SubscriptionId>,
}

/// Attaches the navigation badge, cart summary and wishlist views to `session`.
pub fn mount(session: &StorefrontSession) -> MountedViews {
  let mut cart_ids = Vec::new();
  let mut wishlist_ids = Vec::new();

  // Navigation bar: item badge, recomputed from every published snapshot.
  cart_ids.push(session.cart().subscribe(|cart| {
    info!(view = "navigation", badge = cart.count(), "Cart badge updated");
  }));

  // Cart page: lines and total.
  cart_ids.push(session.cart().subscribe(|cart| {
    for line in cart.iter() {
      info!(
        view = "cart",
        product = %line.name,
        variant = line.variant.as_deref().unwrap_or("-"),
        quantity = line.quantity,
        line_total = %format_amount(line.line_total()),
        "Cart line"
      );
    }
    info!(view = "cart", revision = cart.revision(), total = %format_amount(cart.total()), "Cart total");
  }));

  // Wishlist page and the heart toggles on product cards.
  wishlist_ids.push(session.wishlist().subscribe(|wishlist| {
    let saved: Vec<i64> = wishlist.iter().map(|entry| entry.product_id).collect();
    info!(view = "wishlist", entries = wishlist.len(), saved = ?saved, "Wishlist updated");
  }));

  MountedViews {
    session: session.clone(),
    cart_ids,
    wishlist_ids,
  }
}

impl MountedViews {
  /// Detaches every view mounted by [`mount`].
  pub fn unmount(self) {
    for id in self.cart_ids {
      self.session.cart().unsubscribe(id);
    }
    for id in self.wishlist_ids {
      self.session.wishlist().unsubscribe(id);
    }
  }
}

/// Collections page: one card per catalog entry, badge first.
pub fn render_catalog() -> AppResult<()> {
  for entry in catalog::PRODUCTS {
    let badge = match entry.tag {
      Some(Tag::New) => "NEW",
      Some(Tag::Trending) => "TRENDING",
      Some(Tag::Limited) => "LIMITED",
      None => "",
    };
    let card = serde_json::to_string(entry).map_err(|e| AppError::Internal(e.to_string()))?;
    info!(view = "product_card", id = entry.id, badge, %card, "Product card");
  }
  Ok(())
}
