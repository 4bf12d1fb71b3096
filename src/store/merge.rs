//! Reconciliation of the local list with the remote document.

use std::collections::HashMap;

use crate::property::Property;

/// Merge `local` into `remote`.
///
/// Every remote record is kept unless the local record with the same id was
/// updated strictly later. Local records unknown to the remote are added.
/// The result is ordered newest `updated_at` first, then by id.
///
/// Clock skew between clients can make an older edit win; nothing here tries
/// to order edits causally.
pub fn merge(local: &[Property], remote: &[Property]) -> Vec<Property> {
  let mut by_id: HashMap<&str, &Property> = remote.iter().map(|p| (p.id.as_str(), p)).collect();

  for l in local {
    match by_id.get(l.id.as_str()) {
      Some(r) if l.updated_at <= r.updated_at => {}
      _ => {
        by_id.insert(l.id.as_str(), l);
      }
    }
  }

  let mut merged: Vec<Property> = by_id.into_values().cloned().collect();
  merged.sort_by(|a, b| {
    b.updated_at
      .cmp(&a.updated_at)
      .then_with(|| a.id.cmp(&b.id))
  });
  merged
}
