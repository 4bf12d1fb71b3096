//! Remote availability state machine.

use std::fmt;

use crate::config::{Config, StorageMode};

/// Why the remote store is not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
  /// Configuration selects local storage
  LocalMode,
  /// Gist id or token is missing, a placeholder, or too short
  Credentials,
  /// The remote answered 401/403 during this session
  AuthRejected,
}

impl fmt::Display for DisabledReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      DisabledReason::LocalMode => "storage mode is local",
      DisabledReason::Credentials => "gist credentials are not configured",
      DisabledReason::AuthRejected => "gist rejected the credentials",
    };
    f.write_str(s)
  }
}

/// Whether the remote store may be used.
///
/// The only transition after startup is `Enabled -> Disabled(AuthRejected)`,
/// which lasts until the process restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
  Enabled,
  Disabled(DisabledReason),
}

impl Availability {
  pub fn from_config(config: &Config) -> Self {
    if config.storage_mode == StorageMode::Local {
      Availability::Disabled(DisabledReason::LocalMode)
    } else if !config.credentials_look_valid() {
      Availability::Disabled(DisabledReason::Credentials)
    } else {
      Availability::Enabled
    }
  }

  pub fn is_enabled(&self) -> bool {
    matches!(self, Availability::Enabled)
  }

  pub fn disabled_reason(&self) -> Option<DisabledReason> {
    match self {
      Availability::Enabled => None,
      Availability::Disabled(reason) => Some(*reason),
    }
  }

  /// Record an authentication failure. Returns true if this disabled the remote.
  pub fn on_auth_failure(&mut self) -> bool {
    match self {
      Availability::Enabled => {
        *self = Availability::Disabled(DisabledReason::AuthRejected);
        true
      }
      Availability::Disabled(_) => false,
    }
  }
}
