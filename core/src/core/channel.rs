// conveyor/src/core/channel.rs

//! A named, bounded FIFO queue of string messages.
//!
//! Built on `tokio::sync::mpsc`. The send half lives behind a
//! `parking_lot::Mutex<Option<Sender>>` so the orchestrator can drop it exactly
//! once at shutdown; the receive half lives behind an async `tokio::sync::Mutex`
//! so the channel's (fixed, wiring-time) reader set shares it safely. Neither
//! lock is held across an `.await` on the send path; the receive lock is an
//! async lock precisely so holding it across `recv().await` is sound.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::{ConveyorError, ConveyorResult};

pub(crate) struct Channel {
  name: String,
  sender: Mutex<Option<mpsc::Sender<String>>>,
  receiver: tokio::sync::Mutex<mpsc::Receiver<String>>,
}

impl Channel {
  /// Creates a channel with the given bounded capacity.
  ///
  /// tokio's bounded channels have no rendezvous mode, so a requested
  /// capacity of 0 is clamped to 1.
  pub(crate) fn new(name: impl Into<String>, capacity: usize) -> Self {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    Self {
      name: name.into(),
      sender: Mutex::new(Some(tx)),
      receiver: tokio::sync::Mutex::new(rx),
    }
  }

  pub(crate) fn name(&self) -> &str {
    &self.name
  }

  /// Blocking enqueue, subject to the channel's capacity. This backpressure
  /// is the engine's sole flow-control mechanism; a message is never dropped.
  pub(crate) async fn send(&self, value: String) -> ConveyorResult<()> {
    // Clone the sender out so the lock is released before awaiting.
    let tx = self.sender.lock().clone();
    match tx {
      Some(tx) => tx.send(value).await.map_err(|_| ConveyorError::ChannelClosed {
        name: self.name.clone(),
      }),
      None => Err(ConveyorError::ChannelClosed {
        name: self.name.clone(),
      }),
    }
  }

  /// Blocking dequeue. `None` once the channel is closed and fully drained.
  pub(crate) async fn recv(&self) -> Option<String> {
    self.receiver.lock().await.recv().await
  }

  /// Drops the owned send half so readers drain the buffer and then observe
  /// end-of-stream. Idempotent; called only by the orchestrator, after every
  /// stage task has exited.
  pub(crate) fn close(&self) {
    self.sender.lock().take();
  }
}

impl std::fmt::Debug for Channel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Channel")
      .field("name", &self.name)
      .field("closed", &self.sender.lock().is_none())
      .finish()
  }
}
