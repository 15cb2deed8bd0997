// src/lib.rs

//! Tote: client-side cart and wishlist state for the storefront.
//!
//! Tote keeps the two collections a shopper builds up while browsing:
//!  - A cart of line items keyed by product and variant, with derived total and count.
//!  - A wishlist of saved products, unique by product.
//!  - Write-through persistence of both to a string-keyed storage backend.
//!  - Immutable snapshots published to subscribed views after every change.
//!  - A session handle shared by all views, with wishlist-to-cart moves and checkout.

pub mod core;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod model;
pub mod money;
pub mod session;
pub mod storage;
pub mod wishlist;

// --- Re-exports for the Public API ---

pub use crate::core::{Observer, Snapshot, SubscriptionId};

pub use crate::cart::{CartSnapshot, CartStore};
pub use crate::wishlist::{WishlistSnapshot, WishlistStore};

pub use crate::model::{CartLineItem, LineKey, ProductSnapshot, VariantSelection, WishlistItem};

pub use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub use crate::checkout::{OrderDraft, OrderDraftItem, OrderGateway, OrderReceipt};
pub use crate::config::{StoreConfig, WriteFailurePolicy};
pub use crate::error::{ToteError, ToteResult};
pub use crate::money::{format_amount, parse_amount};

// The session is what applications hand to their views.
pub use crate::session::StorefrontSession;

/*
    Typical wiring:
    1. Pick a backend: `FileStorage::open(dir)?` or `MemoryStorage::new()`, wrapped in an `Arc`.
    2. `StorefrontSession::open(storage, StoreConfig::default())?` hydrates both stores once.
    3. Give each view a clone of the session and `subscribe` it to the store it renders.
    4. UI events call `cart().add_to_cart(..)`, `wishlist().toggle_wishlist(..)`, `move_to_cart(..)`.
    5. Checkout calls `place_order(&gateway, user_id, address).await`; the cart clears on success.
*/
