//! Serde types matching the GitHub Gist API and the document stored inside it.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::property::Property;

// ============================================================================
// GET /gists/{id}
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiGist {
  #[serde(default)]
  pub files: HashMap<String, ApiGistFile>,
}

#[derive(Debug, Deserialize)]
pub struct ApiGistFile {
  pub content: Option<String>,
  /// Set when `content` was cut short; the full file is at `raw_url`
  #[serde(default)]
  pub truncated: bool,
  pub raw_url: Option<String>,
}

// ============================================================================
// PATCH /gists/{id}
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ApiGistUpdate {
  pub files: HashMap<String, ApiGistFileUpdate>,
}

#[derive(Debug, Serialize)]
pub struct ApiGistFileUpdate {
  pub content: String,
}

// ============================================================================
// Document stored in the gist file
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredDocument {
  #[serde(default)]
  pub terrenos: Vec<Property>,
  #[serde(
    rename = "ultimaActualizacion",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub ultima_actualizacion: Option<DateTime<Utc>>,
}

impl ApiGistUpdate {
  /// Body replacing `filename` with `content`.
  pub fn single_file(filename: &str, content: String) -> Self {
    let mut files = HashMap::new();
    files.insert(filename.to_string(), ApiGistFileUpdate { content });
    Self { files }
  }
}
