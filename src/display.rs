//! Plain-text rendering of listings for the terminal.

use chrono::{DateTime, Local, Utc};
use url::Url;

use crate::property::{format_number, format_price, Property, PropertyStatus};
use crate::store::{DataSource, StoreStatus};

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Label shown next to a listing
pub fn status_label(status: PropertyStatus) -> &'static str {
  match status {
    PropertyStatus::Available => "Disponible",
    PropertyStatus::Reserved => "Reservado",
    PropertyStatus::Sold => "Vendido",
  }
}

pub fn source_label(source: DataSource) -> &'static str {
  match source {
    DataSource::Remote => "gist",
    DataSource::Cache => "local cache",
    DataSource::Empty => "no data",
  }
}

/// One-line summary used by `list` and `search`
pub fn listing_line(p: &Property) -> String {
  format!(
    "{:<40} {} {:<28} {:>18}  {:<10} {}",
    p.id,
    if p.featured { '*' } else { ' ' },
    truncate(&format!("{} ({})", p.title, p.location), 28),
    format_price(p.price),
    status_label(p.status),
    format_size(p.size),
  )
}

pub fn format_size(size: u64) -> String {
  if size == 0 {
    "-".to_string()
  } else {
    format!("{} m²", format_number(size))
  }
}

fn format_time(at: DateTime<Utc>) -> String {
  at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Full detail view used by `show`
pub fn listing_detail(p: &Property, whatsapp: &str) -> String {
  let mut lines = vec![
    p.title.clone(),
    format!("  id:          {}", p.id),
    format!("  location:    {}", p.location),
    format!("  price:       {}", format_price(p.price)),
    format!("  size:        {}", format_size(p.size)),
    format!("  status:      {}", status_label(p.status)),
  ];
  if p.featured {
    lines.push("  featured:    yes".to_string());
  }
  if !p.description.is_empty() {
    lines.push(format!("  description: {}", p.description));
  }
  lines.extend(
    p.images
      .iter()
      .map(|image| format!("  image:       {}", truncate(image, 80))),
  );
  if let Some(map) = &p.map_url {
    lines.push(format!("  map:         {}", map));
  }
  if !p.email.is_empty() {
    lines.push(format!("  email:       {}", p.email));
  }
  if !p.phone.is_empty() {
    lines.push(format!("  phone:       {}", p.phone));
  }
  if let Some(link) = whatsapp_link(whatsapp, p) {
    lines.push(format!("  whatsapp:    {}", link));
  }
  lines.push(format!("  created:     {}", format_time(p.created_at)));
  lines.push(format!("  updated:     {}", format_time(p.updated_at)));
  lines.join("\n")
}

/// Prefilled WhatsApp chat link asking about `p`.
///
/// `None` when no contact number is configured.
pub fn whatsapp_link(number: &str, p: &Property) -> Option<String> {
  let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
  if digits.is_empty() {
    return None;
  }

  let message = format!(
    "Hola! Estoy interesado en el terreno: {} ({}). Precio: {}.",
    p.title,
    p.location,
    format_price(p.price)
  );
  Url::parse_with_params(&format!("https://wa.me/{}", digits), &[("text", message)])
    .ok()
    .map(String::from)
}

/// Summary printed by `status`
pub fn status_report(status: &StoreStatus) -> String {
  let remote = match status.availability.disabled_reason() {
    None => "enabled".to_string(),
    Some(reason) => format!("disabled ({})", reason),
  };
  let last_sync = status
    .last_sync
    .map(format_time)
    .unwrap_or_else(|| "never".to_string());

  let mut lines = vec![
    format!("remote:        {}", remote),
    format!("online:        {}", yes_no(status.online)),
    format!("listings:      {}", status.records),
    format!("last sync:     {}", last_sync),
  ];
  if status.auth_error {
    lines.push("warning:       the gist rejected the configured token".to_string());
  }
  if status.credential_error {
    lines.push("warning:       gist id or token missing or placeholder".to_string());
  }
  lines.push(format!("write pending: {}", yes_no(status.write_in_flight)));
  lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
  if flag {
    "yes"
  } else {
    "no"
  }
}
