// conveyor/src/stages/separator.rs

//! Separator runtime: 1 input → N outputs, round-robin.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use crate::core::channel::Channel;
use crate::core::handler::SeparatorFn;
use crate::error::{ConveyorError, ConveyorResult};
use crate::shutdown::ShutdownToken;

/// Reads one message at a time, applies the transform, and delivers to
/// `outputs[delivered % N]`.
///
/// The round-robin counter advances only after a successful delivery, so the
/// assignment stays deterministic under backpressure: a message aborted by
/// cancellation mid-send does not shift later messages to a different output.
/// `N == 0` is valid and makes the stage terminate immediately with no error.
#[instrument(name = "separator_stage", skip_all, fields(stage = %label))]
pub(crate) async fn run_separator(
  label: String,
  handler: SeparatorFn,
  input: Arc<Channel>,
  outputs: Vec<Arc<Channel>>,
  token: ShutdownToken,
) -> ConveyorResult<()> {
  if outputs.is_empty() {
    event!(Level::DEBUG, "Separator has no outputs; terminating immediately.");
    return Ok(());
  }
  event!(Level::DEBUG, outputs = outputs.len(), "Separator stage starting.");

  let mut delivered: usize = 0;
  loop {
    let message = tokio::select! {
      _ = token.cancelled() => {
        event!(Level::DEBUG, "Separator observed cancellation while reading.");
        return Ok(());
      }
      received = input.recv() => match received {
        Some(message) => message,
        None => {
          event!(Level::DEBUG, delivered, "Separator input closed and drained.");
          return Ok(());
        }
      },
    };

    let transformed = handler(&message).map_err(|source| {
      event!(Level::ERROR, error = %source, "Separator handler rejected a payload.");
      ConveyorError::StageFailure {
        stage: label.clone(),
        source,
      }
    })?;

    let target = &outputs[delivered % outputs.len()];
    tokio::select! {
      _ = token.cancelled() => {
        event!(Level::DEBUG, "Separator observed cancellation while writing.");
        return Ok(());
      }
      sent = target.send(transformed) => sent?,
    }
    delivered += 1;
  }
}
