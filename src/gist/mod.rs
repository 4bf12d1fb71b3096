//! Remote store: the property list kept as one JSON file inside a GitHub Gist.

pub mod api_types;
mod client;

pub use client::GistClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::property::Property;

/// The remote document as last fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
  pub properties: Vec<Property>,
  /// `ultimaActualizacion` of the document, when present
  pub updated_at: Option<DateTime<Utc>>,
}

/// Failures talking to the remote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
  /// Transport failure or timeout
  #[error("network unavailable: {0}")]
  Network(String),
  #[error("credentials rejected (HTTP {0})")]
  Auth(u16),
  #[error("gist not found")]
  NotFound,
  #[error("unexpected HTTP status {0}")]
  Status(u16),
  #[error("malformed gist response: {0}")]
  Malformed(String),
}

/// A whole-document remote store.
///
/// Writes replace the entire document; there is no partial update and no
/// concurrency check on the remote side.
#[async_trait]
pub trait RemoteStore: Send + Sync {
  async fn fetch(&self) -> Result<RemoteSnapshot, RemoteError>;

  async fn push(&self, properties: &[Property]) -> Result<(), RemoteError>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
  async fn fetch(&self) -> Result<RemoteSnapshot, RemoteError> {
    (**self).fetch().await
  }

  async fn push(&self, properties: &[Property]) -> Result<(), RemoteError> {
    (**self).push(properties).await
  }
}
