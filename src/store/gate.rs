//! Single-slot coalescing gate for remote writes.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// What happened to a write submitted to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
  /// This caller ran the job; holds the result of its last run
  Ran(T),
  /// Another caller holds the gate and will run the job again for us
  Coalesced,
}

/// Guards remote writes so only one is ever in flight.
///
/// A write requested while another runs sets the pending slot instead of
/// starting a second overwrite. The running writer keeps going until the slot
/// is empty, so the newest snapshot is always the last one written.
#[derive(Debug, Default)]
pub struct WriteGate {
  lock: Mutex<()>,
  pending: AtomicBool,
}

impl WriteGate {
  pub fn new() -> Self {
    Self::default()
  }

  /// Request a run of `job`. `job` must read the state to write when called,
  /// not when submitted.
  pub async fn submit<F, Fut, T>(&self, mut job: F) -> Gated<T>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
  {
    self.pending.store(true, Ordering::SeqCst);
    let mut last = None;

    loop {
      let Ok(guard) = self.lock.try_lock() else {
        break;
      };

      while self.pending.swap(false, Ordering::SeqCst) {
        last = Some(job().await);
      }
      drop(guard);

      // A request may have landed between the last swap and the unlock
      if !self.pending.load(Ordering::SeqCst) {
        break;
      }
    }

    match last {
      Some(result) => Gated::Ran(result),
      None => Gated::Coalesced,
    }
  }

  pub fn is_busy(&self) -> bool {
    self.lock.try_lock().is_err()
  }
}
