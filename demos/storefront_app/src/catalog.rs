// demos/storefront_app/src/catalog.rs

//! The static product catalog the storefront pages render.

use crate::errors::{AppError, Result as AppResult};
use serde::Serialize;
use tote::{parse_amount, ProductSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
  New,
  Trending,
  Limited,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
  pub id: &'static str,
  pub name: &'static str,
  /// Display price as merchandised, e.g. `₹3,199`.
  pub price: &'static str,
  pub tag: Option<Tag>,
  pub image_url: &'static str,
}

pub const PRODUCTS: &[CatalogEntry] = &[
  CatalogEntry {
    id: "1",
    name: "Aurora Oversized Tee",
    price: "₹3,199",
    tag: Some(Tag::New),
    image_url: "https://images.unsplash.com/photo-1520975916090-3105956dac38?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "2",
    name: "Midnight Cargo Pants",
    price: "₹5,699",
    tag: Some(Tag::Trending),
    image_url: "https://images.unsplash.com/photo-1520975659191-37b08d84b0bf?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "3",
    name: "Nimbus Hoodie",
    price: "₹4,899",
    tag: None,
    image_url: "https://images.unsplash.com/photo-1515378791036-0648a3ef77b2?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "4",
    name: "Pulse Running Shorts",
    price: "₹2,899",
    tag: Some(Tag::Limited),
    image_url: "https://images.unsplash.com/photo-1520975659191-37b08d84b0bf?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "5",
    name: "Ripple Knit Sweater",
    price: "₹6,299",
    tag: None,
    image_url: "https://images.unsplash.com/photo-1544441893-675973e31985?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "6",
    name: "Vibe Track Jacket",
    price: "₹7,499",
    tag: Some(Tag::Trending),
    image_url: "https://images.unsplash.com/photo-1512436991641-6745cdb1723f?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "7",
    name: "Flux Denim",
    price: "₹6,599",
    tag: None,
    image_url: "https://images.unsplash.com/photo-1503341455253-b2e723bb3dbb?q=80&w=1000&auto=format&fit=crop",
  },
  CatalogEntry {
    id: "8",
    name: "Echo Rib Tank",
    price: "₹2,399",
    tag: None,
    image_url: "https://images.unsplash.com/photo-1519741497674-611481863552?q=80&w=1000&auto=format&fit=crop",
  },
];

impl CatalogEntry {
  /// Converts the merchandised entry into the numeric snapshot the stores keep.
  pub fn snapshot(&self) -> AppResult<ProductSnapshot> {
    let product_id = self
      .id
      .parse::<i64>()
      .map_err(|e| AppError::Validation(format!("Catalog id '{}' is not numeric: {}", self.id, e)))?;
    let price = parse_amount(self.price)
      .ok_or_else(|| AppError::Validation(format!("Catalog price '{}' for '{}' is not a number", self.price, self.name)))?;
    Ok(ProductSnapshot::new(product_id, self.name, price, self.image_url))
  }
}

/// Looks a product up by its catalog id and returns its snapshot.
pub fn find(id: &str) -> AppResult<ProductSnapshot> {
  PRODUCTS
    .iter()
    .find(|entry| entry.id == id)
    .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))?
    .snapshot()
}
