//! Background reconciliation loop used by `terrenos watch`.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::LocalCache;
use crate::event::{EventHandler, SyncEvent};
use crate::gist::RemoteStore;
use crate::store::{PropertyStore, ReconcileReport, StoreError};

/// Drives a store from timer and connectivity events until shutdown.
pub struct SyncDriver<R, C> {
  store: Arc<PropertyStore<R, C>>,
}

impl<R: RemoteStore, C: LocalCache> SyncDriver<R, C> {
  pub fn new(store: Arc<PropertyStore<R, C>>) -> Self {
    Self { store }
  }

  /// Process events until `Shutdown` or until every sender is gone.
  /// Returns the number of reconciles attempted.
  pub async fn run(&self, mut events: EventHandler) -> usize {
    let mut attempts = 0;

    while let Some(event) = events.next().await {
      match event {
        SyncEvent::Tick => {
          if self.store.availability().is_enabled() {
            attempts += 1;
            log_reconcile(self.store.reconcile().await);
          } else {
            debug!("Remote disabled, skipping periodic sync");
          }
        }
        SyncEvent::Connectivity(online) => {
          if let Some(result) = self.store.set_online(online).await {
            attempts += 1;
            log_reconcile(result);
          }
        }
        SyncEvent::Shutdown => {
          info!("Stopping sync loop");
          break;
        }
      }
    }

    attempts
  }
}

fn log_reconcile(result: Result<ReconcileReport, StoreError>) {
  match result {
    Ok(report) => match report.pushed {
      Some(outcome) => info!(total = report.total, remote = %outcome.describe(), "Sync complete"),
      None => debug!(total = report.total, "Already in sync"),
    },
    Err(e) => warn!(error = %e, "Sync failed, will retry"),
  }
}
