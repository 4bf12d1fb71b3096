use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::format::format_price;

/// Availability of a plot for sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
  #[default]
  #[serde(rename = "disponible", alias = "available")]
  Available,
  #[serde(rename = "reservado", alias = "reserved")]
  Reserved,
  #[serde(rename = "vendido", alias = "sold")]
  Sold,
}

impl FromStr for PropertyStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "disponible" | "available" => Ok(PropertyStatus::Available),
      "reservado" | "reserved" => Ok(PropertyStatus::Reserved),
      "vendido" | "sold" => Ok(PropertyStatus::Sold),
      other => Err(format!(
        "unknown status '{}' (expected available, reserved or sold)",
        other
      )),
    }
  }
}

/// A property listing as stored in the Gist document and the local cache.
///
/// Field names on the wire are the ones the public site already writes, so an
/// existing document keeps loading. Fields the older site never wrote
/// (`destacado`, `estado`, timestamps) fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
  pub id: String,
  #[serde(rename = "titulo")]
  pub title: String,
  #[serde(rename = "ubicacion")]
  pub location: String,
  #[serde(rename = "precio", default)]
  pub price: u64,
  /// Square meters
  #[serde(rename = "tamaño", default)]
  pub size: u64,
  #[serde(rename = "descripcion", default)]
  pub description: String,
  #[serde(rename = "imagenes", default)]
  pub images: Vec<String>,
  #[serde(
    rename = "mapaUrl",
    default,
    deserialize_with = "deserialize_empty_as_none",
    skip_serializing_if = "Option::is_none"
  )]
  pub map_url: Option<String>,
  #[serde(default)]
  pub email: String,
  #[serde(rename = "telefono", default)]
  pub phone: String,
  #[serde(rename = "destacado", default)]
  pub featured: bool,
  #[serde(rename = "estado", default)]
  pub status: PropertyStatus,
  #[serde(rename = "fechaCreacion", default)]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "fechaActualizacion", default)]
  pub updated_at: DateTime<Utc>,
}

fn deserialize_empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let v: Option<String> = Option::deserialize(deserializer)?;
  Ok(v.filter(|s| !s.trim().is_empty()))
}

impl Property {
  /// Build a new record from validated input.
  pub fn from_draft(id: String, draft: PropertyDraft, now: DateTime<Utc>) -> Self {
    Self {
      id,
      title: draft.title.trim().to_string(),
      location: draft.location.trim().to_string(),
      price: draft.price,
      size: draft.size,
      description: draft.description.trim().to_string(),
      images: draft.images,
      map_url: draft.map_url.filter(|u| !u.trim().is_empty()),
      email: draft.email.trim().to_string(),
      phone: draft.phone.trim().to_string(),
      featured: draft.featured,
      status: draft.status,
      created_at: now,
      updated_at: now,
    }
  }

  /// Refresh `updated_at`, always moving it forward even if the clock did not.
  pub fn touch(&mut self, now: DateTime<Utc>) {
    let floor = self.updated_at + Duration::milliseconds(1);
    self.updated_at = now.max(floor);
  }

  /// Lowercased text the search operation matches against.
  pub fn search_text(&self) -> String {
    format!(
      "{} {} {} {}",
      self.title,
      self.location,
      self.description,
      format_price(self.price)
    )
    .to_lowercase()
  }

  /// Candidate id in the format the public site uses.
  pub fn generate_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("terreno_{}_{}", now.timestamp_millis(), &random[..9])
  }

  /// Convert back into editable input, e.g. to validate a patched record.
  pub fn to_draft(&self) -> PropertyDraft {
    PropertyDraft {
      title: self.title.clone(),
      location: self.location.clone(),
      price: self.price,
      size: self.size,
      description: self.description.clone(),
      images: self.images.clone(),
      map_url: self.map_url.clone(),
      email: self.email.clone(),
      phone: self.phone.clone(),
      featured: self.featured,
      status: self.status,
    }
  }
}

/// Input for creating a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDraft {
  pub title: String,
  pub location: String,
  pub price: u64,
  pub size: u64,
  pub description: String,
  pub images: Vec<String>,
  pub map_url: Option<String>,
  pub email: String,
  pub phone: String,
  pub featured: bool,
  pub status: PropertyStatus,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPatch {
  pub title: Option<String>,
  pub location: Option<String>,
  pub price: Option<u64>,
  pub size: Option<u64>,
  pub description: Option<String>,
  pub images: Option<Vec<String>>,
  /// `Some("")` clears the map reference
  pub map_url: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub featured: Option<bool>,
  pub status: Option<PropertyStatus>,
}

impl PropertyPatch {
  pub fn is_empty(&self) -> bool {
    *self == PropertyPatch::default()
  }

  /// Apply the present fields onto `draft`.
  pub fn apply(self, draft: &mut PropertyDraft) {
    if let Some(title) = self.title {
      draft.title = title;
    }
    if let Some(location) = self.location {
      draft.location = location;
    }
    if let Some(price) = self.price {
      draft.price = price;
    }
    if let Some(size) = self.size {
      draft.size = size;
    }
    if let Some(description) = self.description {
      draft.description = description;
    }
    if let Some(images) = self.images {
      draft.images = images;
    }
    if let Some(map_url) = self.map_url {
      draft.map_url = Some(map_url).filter(|u| !u.trim().is_empty());
    }
    if let Some(email) = self.email {
      draft.email = email;
    }
    if let Some(phone) = self.phone {
      draft.phone = phone;
    }
    if let Some(featured) = self.featured {
      draft.featured = featured;
    }
    if let Some(status) = self.status {
      draft.status = status;
    }
  }
}
