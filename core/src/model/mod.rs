// tote/src/model/mod.rs

//! Item shapes held by the stores and the catalog snapshots pages feed into them.

pub mod cart_item;
pub mod product;
pub mod variant;
pub mod wishlist_item;

pub use cart_item::{CartLineItem, LineKey};
pub use product::ProductSnapshot;
pub use variant::VariantSelection;
pub use wishlist_item::WishlistItem;
