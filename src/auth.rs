use crate::config::AdminConfig;

/// Admin login configured for mutating commands.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
  username: String,
  password: String,
}

impl AdminCredentials {
  pub fn from_config(config: &AdminConfig) -> Self {
    Self {
      username: config.username.trim().to_string(),
      password: config.password.trim().to_string(),
    }
  }

  /// Check a login attempt. Surrounding whitespace is ignored.
  pub fn verify(&self, username: &str, password: &str) -> bool {
    !self.username.is_empty() && username.trim() == self.username && password.trim() == self.password
  }
}
