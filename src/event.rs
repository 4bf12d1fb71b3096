use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Events driving the background sync loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
  /// Periodic reconcile with the remote
  Tick,
  /// Connectivity changed; `true` means back online
  Connectivity(bool),
  /// Stop the loop
  Shutdown,
}

/// Event handler that produces events from a tick timer and Ctrl-C
pub struct EventHandler {
  tx: mpsc::UnboundedSender<SyncEvent>,
  rx: mpsc::UnboundedReceiver<SyncEvent>,
}

impl EventHandler {
  /// Create a new event handler ticking every `interval`
  pub fn new(interval: Duration) -> Self {
    let handler = Self::manual();

    // Spawn tick timer
    let tx = handler.sender();
    tokio::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      // The first tick fires immediately; startup already loaded
      ticker.tick().await;
      loop {
        ticker.tick().await;
        if tx.send(SyncEvent::Tick).is_err() {
          break;
        }
      }
    });

    // Spawn Ctrl-C listener
    let tx = handler.sender();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        debug!("Interrupt received");
        let _ = tx.send(SyncEvent::Shutdown);
      }
    });

    handler
  }

  /// Handler with no event sources; events come only through `sender`
  pub fn manual() -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self { tx, rx }
  }

  /// Sender for injecting events, e.g. connectivity changes
  pub fn sender(&self) -> mpsc::UnboundedSender<SyncEvent> {
    self.tx.clone()
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<SyncEvent> {
    self.rx.recv().await
  }
}
