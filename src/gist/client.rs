use async_trait::async_trait;
use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use super::api_types::{ApiGist, ApiGistUpdate, StoredDocument};
use super::{RemoteError, RemoteSnapshot, RemoteStore};
use crate::config::Config;
use crate::property::Property;

const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("terrenos/", env!("CARGO_PKG_VERSION"));

/// GitHub Gist API client holding the property document.
#[derive(Clone)]
pub struct GistClient {
  http: reqwest::Client,
  gist_url: String,
  filename: String,
  token: String,
}

impl GistClient {
  pub fn new(config: &Config) -> Result<Self> {
    Self::from_parts(
      &config.gist.api_url,
      &config.gist.id,
      &config.gist.filename,
      config.token(),
      config.gist.timeout(),
    )
  }

  pub fn from_parts(
    api_url: &str,
    gist_id: &str,
    filename: &str,
    token: &str,
    timeout: Duration,
  ) -> Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      gist_url: format!("{}/gists/{}", api_url.trim_end_matches('/'), gist_id.trim()),
      filename: filename.to_string(),
      token: token.trim().to_string(),
    })
  }

  /// GET a URL with the gist credentials, returning the body of a 2xx response.
  async fn get_text(&self, url: &str) -> Result<String, RemoteError> {
    let response = self
      .http
      .get(url)
      .bearer_auth(&self.token)
      .header(ACCEPT, GITHUB_JSON)
      .send()
      .await
      .map_err(network_error)?;

    check_status(response.status())?;

    response.text().await.map_err(network_error)
  }
}

#[async_trait]
impl RemoteStore for GistClient {
  async fn fetch(&self) -> Result<RemoteSnapshot, RemoteError> {
    debug!(url = %self.gist_url, "Fetching gist");

    let body = self.get_text(&self.gist_url).await?;
    let gist: ApiGist =
      serde_json::from_str(&body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    let Some(file) = gist.files.get(&self.filename) else {
      warn!(filename = %self.filename, "Gist has no such file yet, treating it as empty");
      return Ok(RemoteSnapshot::default());
    };

    let content = match (&file.content, file.truncated) {
      (Some(content), false) => content.clone(),
      _ => {
        let raw_url = file.raw_url.as_deref().ok_or_else(|| {
          RemoteError::Malformed(format!("file {} has no content", self.filename))
        })?;
        debug!(url = %raw_url, "Gist file truncated, fetching raw content");
        self.get_text(raw_url).await?
      }
    };

    let snapshot = parse_document(&content)?;
    debug!(count = snapshot.properties.len(), "Gist fetched");
    Ok(snapshot)
  }

  async fn push(&self, properties: &[Property]) -> Result<(), RemoteError> {
    let document = StoredDocument {
      terrenos: properties.to_vec(),
      ultima_actualizacion: Some(Utc::now()),
    };
    let content = serde_json::to_string_pretty(&document)
      .map_err(|e| RemoteError::Malformed(e.to_string()))?;
    let body = ApiGistUpdate::single_file(&self.filename, content);

    debug!(url = %self.gist_url, count = properties.len(), "Writing gist");

    let response = self
      .http
      .patch(&self.gist_url)
      .bearer_auth(&self.token)
      .header(ACCEPT, GITHUB_JSON)
      .json(&body)
      .send()
      .await
      .map_err(network_error)?;

    check_status(response.status())
  }
}

/// Parse the JSON document stored inside the gist file.
fn parse_document(content: &str) -> Result<RemoteSnapshot, RemoteError> {
  let document: StoredDocument =
    serde_json::from_str(content).map_err(|e| RemoteError::Malformed(e.to_string()))?;

  Ok(RemoteSnapshot {
    properties: document.terrenos,
    updated_at: document.ultima_actualizacion,
  })
}

fn check_status(status: StatusCode) -> Result<(), RemoteError> {
  match status {
    s if s.is_success() => Ok(()),
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RemoteError::Auth(status.as_u16())),
    StatusCode::NOT_FOUND => Err(RemoteError::NotFound),
    s => Err(RemoteError::Status(s.as_u16())),
  }
}

fn network_error(e: reqwest::Error) -> RemoteError {
  if e.is_timeout() {
    RemoteError::Network(format!("request timed out: {}", e))
  } else if e.is_decode() {
    RemoteError::Malformed(e.to_string())
  } else {
    RemoteError::Network(e.to_string())
  }
}
