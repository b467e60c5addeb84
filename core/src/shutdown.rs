// conveyor/src/shutdown.rs

//! Cooperative cancellation for pipeline runs.
//!
//! One [`ShutdownHandle`] broadcasts to any number of cloned [`ShutdownToken`]s
//! over a `tokio::sync::watch` channel. Every blocking channel operation inside
//! the engine races against `token.cancelled()`, so a stage blocked on a full
//! or empty channel still observes cancellation at that suspension point.
//!
//! The engine carries no timers of its own: a deadline is simply the caller
//! triggering the handle from a timer task it owns.

use tokio::sync::watch;

/// Creates a connected shutdown pair.
///
/// The token side is `Clone`; hand one clone to `Pipeline::run` and keep the
/// handle wherever cancellation decisions are made.
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownToken) {
  let (tx, rx) = watch::channel(false);
  (ShutdownHandle { tx }, ShutdownToken { rx })
}

/// The triggering side of a shutdown pair.
///
/// Dropping the handle without triggering counts as cancellation for any
/// token still waiting; holders of long-lived tokens are never stranded.
#[derive(Debug)]
pub struct ShutdownHandle {
  tx: watch::Sender<bool>,
}

impl ShutdownHandle {
  /// Broadcasts cancellation to every token. Idempotent.
  pub fn trigger(&self) {
    let _ = self.tx.send(true);
  }
}

/// The observing side of a shutdown pair.
#[derive(Debug, Clone)]
pub struct ShutdownToken {
  rx: watch::Receiver<bool>,
}

impl ShutdownToken {
  /// Returns whether cancellation has already been triggered.
  pub fn is_cancelled(&self) -> bool {
    *self.rx.borrow()
  }

  /// Resolves once the handle triggers (or is dropped). Immediate if
  /// cancellation already happened; safe to call from any number of tasks.
  pub async fn cancelled(&self) {
    let mut rx = self.rx.clone();
    // wait_for returns Err only when the sender is gone, which we treat the
    // same as an explicit trigger.
    let _ = rx.wait_for(|triggered| *triggered).await;
  }
}
