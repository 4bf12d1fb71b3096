/// Shown instead of a price when the listing has none.
pub const PRICE_ON_REQUEST: &str = "Consultar precio";

/// Format an integer with `.` as thousands separator (es-PY convention).
pub fn format_number(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push('.');
    }
    out.push(c);
  }

  out
}

/// Format a price in guaraníes, or the price-on-request sentinel for zero.
pub fn format_price(price: u64) -> String {
  if price == 0 {
    return PRICE_ON_REQUEST.to_string();
  }
  format!("Gs. {}", format_number(price))
}
