use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::property::ImageLimits;

/// Gist ids and tokens shipped in templates; never real credentials.
const PLACEHOLDERS: &[&str] = &["TU_GIST_ID_AQUI", "TU_TOKEN_AQUI", "YOUR_GIST_ID", "YOUR_TOKEN"];
const MIN_GIST_ID_LEN: usize = 20;
const MIN_TOKEN_LEN: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub storage_mode: StorageMode,
  #[serde(default)]
  pub gist: GistConfig,
  #[serde(default)]
  pub sync: SyncConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub admin: AdminConfig,
  #[serde(default)]
  pub contact: ContactConfig,
  #[serde(default)]
  pub images: ImagesConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
  /// Local cache only, never contact the Gist
  Local,
  /// Gist as primary store, local cache as fallback
  #[default]
  #[serde(alias = "gist")]
  Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistConfig {
  #[serde(default)]
  pub id: String,
  #[serde(default = "default_filename")]
  pub filename: String,
  /// Overridden by TERRENOS_GIST_TOKEN / GITHUB_TOKEN
  pub token: Option<String>,
  #[serde(default = "default_api_url")]
  pub api_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for GistConfig {
  fn default() -> Self {
    Self {
      id: String::new(),
      filename: default_filename(),
      token: None,
      api_url: default_api_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl GistConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
  /// Seconds between reconciliations in watch mode
  #[serde(default = "default_interval_secs")]
  pub interval_secs: u64,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      interval_secs: default_interval_secs(),
    }
  }
}

impl SyncConfig {
  pub fn interval(&self) -> Duration {
    Duration::from_secs(self.interval_secs.max(1))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
  /// Defaults to $XDG_DATA_HOME/terrenos/cache.db
  pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
  pub username: String,
  pub password: String,
}

impl Default for AdminConfig {
  fn default() -> Self {
    Self {
      username: "admin".to_string(),
      password: "admin123".to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
  /// WhatsApp number in international format without '+'
  #[serde(default = "default_whatsapp")]
  pub whatsapp: String,
  pub email: Option<String>,
  pub phone: Option<String>,
}

impl Default for ContactConfig {
  fn default() -> Self {
    Self {
      whatsapp: default_whatsapp(),
      email: None,
      phone: None,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
  /// Used when a new listing has no images
  #[serde(default = "default_images")]
  pub defaults: Vec<String>,
  #[serde(default = "default_max_images")]
  pub max_images: usize,
  #[serde(default = "default_max_file_size")]
  pub max_file_size: usize,
}

impl Default for ImagesConfig {
  fn default() -> Self {
    Self {
      defaults: default_images(),
      max_images: default_max_images(),
      max_file_size: default_max_file_size(),
    }
  }
}

impl ImagesConfig {
  pub fn limits(&self) -> ImageLimits {
    ImageLimits {
      max_images: self.max_images,
      max_file_size: self.max_file_size,
    }
  }
}

fn default_filename() -> String {
  "terrenos-py.json".to_string()
}

fn default_api_url() -> String {
  "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
  10
}

fn default_interval_secs() -> u64 {
  120
}

fn default_whatsapp() -> String {
  "595984323438".to_string()
}

fn default_images() -> Vec<String> {
  vec![
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=800&auto=format&fit=crop"
      .to_string(),
    "https://images.unsplash.com/photo-1570129477492-45c003edd2be?w=800&auto=format&fit=crop"
      .to_string(),
  ]
}

fn default_max_images() -> usize {
  6
}

fn default_max_file_size() -> usize {
  5 * 1024 * 1024
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./terrenos.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/terrenos/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => {
        return Err(eyre!(
          "No configuration file found. Create one at ~/.config/terrenos/config.yaml\n\
                 See the README section on configuration for the format."
        ))
      }
    };

    if let Some(token) = Self::token_from_env() {
      config.gist.token = Some(token);
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("terrenos.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("terrenos").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))
  }

  /// Get the Gist token from environment variables.
  ///
  /// Checks TERRENOS_GIST_TOKEN first, then GITHUB_TOKEN as fallback.
  fn token_from_env() -> Option<String> {
    std::env::var("TERRENOS_GIST_TOKEN")
      .or_else(|_| std::env::var("GITHUB_TOKEN"))
      .ok()
      .filter(|t| !t.trim().is_empty())
  }

  pub fn token(&self) -> &str {
    self.gist.token.as_deref().unwrap_or("")
  }

  /// Superficial check that the Gist id and token could be real.
  pub fn credentials_look_valid(&self) -> bool {
    looks_real(&self.gist.id, MIN_GIST_ID_LEN) && looks_real(self.token(), MIN_TOKEN_LEN)
  }
}

fn looks_real(value: &str, min_len: usize) -> bool {
  let value = value.trim();
  value.len() >= min_len
    && !PLACEHOLDERS.contains(&value)
    && !value.chars().skip(4).all(|c| c == 'x' || c == 'X')
}
