// tote/src/money.rs

//! Price display and parsing for the storefront's single currency.

pub const CURRENCY_SYMBOL: &str = "₹";

/// `₹` followed by the amount with exactly two decimals, e.g. `₹1500.00`.
pub fn format_amount(amount: f64) -> String {
  format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// Parses catalog price strings such as `"₹3,199"`, `"3199.50"` or `" ₹ 12 "`.
///
/// Returns `None` for empty, negative or non-numeric input.
pub fn parse_amount(raw: &str) -> Option<f64> {
  let cleaned: String = raw
    .trim()
    .trim_start_matches(CURRENCY_SYMBOL)
    .chars()
    .filter(|c| *c != ',' && !c.is_whitespace())
    .collect();
  if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
    return None;
  }
  cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
