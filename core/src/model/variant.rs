// tote/src/model/variant.rs

//! Variant labels as chosen on the product-details page.
//!
//! A cart line's variant is a free-text string and is compared verbatim.
//! `VariantSelection` is the single place that builds those strings, always
//! in the same field order, so one choice never produces two labels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
  pub size: Option<String>,
  pub color: Option<String>,
}

impl VariantSelection {
  pub fn new(size: impl Into<String>, color: impl Into<String>) -> Self {
    Self {
      size: Some(size.into()),
      color: Some(color.into()),
    }
  }

  /// `"Size: <size>, Color: <color>"` once both are picked, otherwise `None`.
  pub fn label(&self) -> Option<String> {
    let size = non_blank(self.size.as_deref())?;
    let color = non_blank(self.color.as_deref())?;
    Some(format!("Size: {}, Color: {}", size, color))
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn label_needs_both_size_and_color() {
    assert_eq!(VariantSelection::new("M", "Red").label().as_deref(), Some("Size: M, Color: Red"));
    assert_eq!(
      VariantSelection {
        size: Some("M".into()),
        color: None
      }
      .label(),
      None
    );
    assert_eq!(VariantSelection::new(" ", "Red").label(), None);
    assert_eq!(VariantSelection::default().label(), None);
  }
}
