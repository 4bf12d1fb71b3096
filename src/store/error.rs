use thiserror::Error;

use super::availability::DisabledReason;
use crate::gist::RemoteError;
use crate::property::ValidationError;

/// Errors reported by the property store.
///
/// The store is the only place that turns backend failures into these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
  #[error("remote store unreachable: {0}")]
  NetworkUnavailable(String),

  #[error("remote store rejected the credentials")]
  RemoteAuthFailure,

  #[error("remote gist not found")]
  RemoteNotFound,

  #[error("remote store sent a malformed response: {0}")]
  RemoteMalformedResponse(String),

  #[error("invalid listing: {0}")]
  ValidationFailure(#[from] ValidationError),

  #[error("no listing with id {0}")]
  NotFound(String),

  #[error("local cache unavailable: {0}")]
  CacheUnavailable(String),

  #[error("remote store disabled: {0}")]
  RemoteDisabled(DisabledReason),
}

impl From<RemoteError> for StoreError {
  fn from(e: RemoteError) -> Self {
    match e {
      RemoteError::Network(msg) => StoreError::NetworkUnavailable(msg),
      RemoteError::Status(code) => StoreError::NetworkUnavailable(format!("HTTP {}", code)),
      RemoteError::Auth(_) => StoreError::RemoteAuthFailure,
      RemoteError::NotFound => StoreError::RemoteNotFound,
      RemoteError::Malformed(msg) => StoreError::RemoteMalformedResponse(msg),
    }
  }
}

/// Flat success/reason/message shape for whatever presents results to people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
  pub success: bool,
  pub error: Option<StoreError>,
  pub message: Option<String>,
}

impl Outcome {
  pub fn ok(message: impl Into<String>) -> Self {
    Self {
      success: true,
      error: None,
      message: Some(message.into()),
    }
  }

  pub fn failed(error: StoreError) -> Self {
    let message = Some(error.to_string());
    Self {
      success: false,
      error: Some(error),
      message,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_remote_error_mapping() {
    assert_eq!(
      StoreError::from(RemoteError::Auth(403)),
      StoreError::RemoteAuthFailure
    );
    assert_eq!(
      StoreError::from(RemoteError::Status(503)),
      StoreError::NetworkUnavailable("HTTP 503".to_string())
    );
    assert_eq!(
      StoreError::from(RemoteError::NotFound),
      StoreError::RemoteNotFound
    );
    assert!(matches!(
      StoreError::from(RemoteError::Malformed("x".to_string())),
      StoreError::RemoteMalformedResponse(_)
    ));
  }

  #[test]
  fn test_failed_outcome_carries_message() {
    let outcome = Outcome::failed(StoreError::NotFound("terreno_1".to_string()));
    assert!(!outcome.success);
    assert_eq!(
      outcome.message.as_deref(),
      Some("no listing with id terreno_1")
    );
  }
}
