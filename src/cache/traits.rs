//! Typed access to the cached property snapshot and status flags.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};

use super::storage::LocalCache;
use crate::property::Property;

/// Property list snapshot
const PROPERTIES_KEY: &str = "terrenos_py_cache";
/// RFC 3339 time of the last snapshot write
const LAST_SYNC_KEY: &str = "terrenos_py_last_sync";
const AUTH_ERROR_KEY: &str = "terrenos_py_gist_auth_error";
const CREDENTIAL_ERROR_KEY: &str = "terrenos_py_credential_error";

/// Typed helpers available on every [`LocalCache`].
pub trait PropertyCache: LocalCache {
  /// Read the cached property list, `None` if nothing was ever cached.
  fn load_properties(&self) -> Result<Option<Vec<Property>>> {
    match self.get(PROPERTIES_KEY)? {
      Some(json) => serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| eyre!("Cached property list is corrupt: {}", e)),
      None => Ok(None),
    }
  }

  /// Overwrite the cached list and stamp the sync time.
  fn store_properties(&self, properties: &[Property], at: DateTime<Utc>) -> Result<()> {
    let json = serde_json::to_string(properties)
      .map_err(|e| eyre!("Failed to serialize property list: {}", e))?;
    self.set(PROPERTIES_KEY, &json)?;
    self.set(LAST_SYNC_KEY, &at.to_rfc3339())
  }

  fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
    match self.get(LAST_SYNC_KEY)? {
      Some(s) => DateTime::parse_from_rfc3339(&s)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| eyre!("Failed to parse last sync time '{}': {}", s, e)),
      None => Ok(None),
    }
  }

  fn auth_error_flag(&self) -> Result<bool> {
    self.flag(AUTH_ERROR_KEY)
  }

  fn set_auth_error_flag(&self, on: bool) -> Result<()> {
    self.set_flag(AUTH_ERROR_KEY, on)
  }

  fn credential_error_flag(&self) -> Result<bool> {
    self.flag(CREDENTIAL_ERROR_KEY)
  }

  fn set_credential_error_flag(&self, on: bool) -> Result<()> {
    self.set_flag(CREDENTIAL_ERROR_KEY, on)
  }

  fn flag(&self, key: &str) -> Result<bool> {
    Ok(self.get(key)?.as_deref() == Some("true"))
  }

  fn set_flag(&self, key: &str, on: bool) -> Result<()> {
    if on {
      self.set(key, "true")
    } else {
      self.remove(key)
    }
  }
}

impl<T: LocalCache + ?Sized> PropertyCache for T {}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::SqliteCache;
  use crate::property::{Property, PropertyDraft};
  use chrono::TimeZone;

  fn property(id: &str) -> Property {
    let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap();
    Property::from_draft(
      id.to_string(),
      PropertyDraft {
        title: format!("Lote {}", id),
        location: "Areguá".to_string(),
        ..Default::default()
      },
      now,
    )
  }

  #[test]
  fn test_empty_cache() {
    let cache = SqliteCache::open_in_memory().unwrap();
    assert_eq!(cache.load_properties().unwrap(), None);
    assert_eq!(cache.last_sync().unwrap(), None);
    assert!(!cache.auth_error_flag().unwrap());
  }

  #[test]
  fn test_store_and_load_properties() {
    let cache = SqliteCache::open_in_memory().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap();
    let list = vec![property("a"), property("b")];

    cache.store_properties(&list, at).unwrap();

    assert_eq!(cache.load_properties().unwrap(), Some(list));
    assert_eq!(cache.last_sync().unwrap(), Some(at));
  }

  #[test]
  fn test_corrupt_snapshot_is_an_error() {
    let cache = SqliteCache::open_in_memory().unwrap();
    cache.set(PROPERTIES_KEY, "{not json").unwrap();
    assert!(cache.load_properties().is_err());
  }

  #[test]
  fn test_flags_toggle() {
    let cache = SqliteCache::open_in_memory().unwrap();

    cache.set_credential_error_flag(true).unwrap();
    cache.set_auth_error_flag(true).unwrap();
    assert!(cache.credential_error_flag().unwrap());
    assert!(cache.auth_error_flag().unwrap());

    cache.set_auth_error_flag(false).unwrap();
    assert!(!cache.auth_error_flag().unwrap());
    assert!(cache.credential_error_flag().unwrap());
  }
}
