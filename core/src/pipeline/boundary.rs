// conveyor/src/pipeline/boundary.rs

//! Boundary API: external production/consumption on named channels,
//! concurrent with a running pipeline.

use tracing::{event, Level};

use crate::error::{ConveyorError, ConveyorResult};
use crate::pipeline::definition::Pipeline;

/// Sentinel returned by [`Pipeline::recv`] on a closed, fully-drained
/// channel. Distinct from [`ConveyorError::ChannelNotFound`]: the name was
/// valid, there is simply nothing left to read.
pub const DRAINED: &str = "undefined";

impl Pipeline {
  /// Enqueues `value` on the named channel, blocking while the bounded buffer
  /// is full (the engine's only backpressure mechanism).
  ///
  /// Fails with `ChannelNotFound` for a name no registration ever referenced,
  /// and with `ChannelClosed` once the pipeline has shut the channel.
  pub async fn send(&self, name: &str, value: impl Into<String>) -> ConveyorResult<()> {
    let channel = self.registry.get(name).ok_or_else(|| ConveyorError::ChannelNotFound {
      name: name.to_string(),
    })?;
    channel.send(value.into()).await
  }

  /// Dequeues one message from the named channel, blocking until one is
  /// available or the channel closes.
  ///
  /// Fails with `ChannelNotFound` for an unregistered name. On a closed and
  /// drained channel this returns `Ok(`[`DRAINED`]`)` — a sentinel value, not
  /// an error.
  pub async fn recv(&self, name: &str) -> ConveyorResult<String> {
    let channel = self.registry.get(name).ok_or_else(|| ConveyorError::ChannelNotFound {
      name: name.to_string(),
    })?;
    match channel.recv().await {
      Some(value) => Ok(value),
      None => {
        event!(Level::TRACE, channel = name, "Recv on drained channel; returning sentinel.");
        Ok(DRAINED.to_string())
      }
    }
  }
}
