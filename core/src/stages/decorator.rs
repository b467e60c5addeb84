// conveyor/src/stages/decorator.rs

//! Decorator runtime: 1 input → 1 output, order preserving.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use crate::core::channel::Channel;
use crate::core::handler::DecoratorFn;
use crate::error::{ConveyorError, ConveyorResult};
use crate::shutdown::ShutdownToken;

/// Repeatedly reads from `input`, applies the transform, and writes exactly
/// one output message per input message, in arrival order.
///
/// A handler `Err` is a poisoned payload: the stage returns `StageFailure`
/// immediately and emits nothing for that message. Terminates cleanly once
/// the input is closed and drained, or when cancellation is observed.
#[instrument(name = "decorator_stage", skip_all, fields(stage = %label))]
pub(crate) async fn run_decorator(
  label: String,
  handler: DecoratorFn,
  input: Arc<Channel>,
  output: Arc<Channel>,
  token: ShutdownToken,
) -> ConveyorResult<()> {
  event!(Level::DEBUG, "Decorator stage starting.");
  loop {
    let message = tokio::select! {
      _ = token.cancelled() => {
        event!(Level::DEBUG, "Decorator observed cancellation while reading.");
        return Ok(());
      }
      received = input.recv() => match received {
        Some(message) => message,
        None => {
          event!(Level::DEBUG, "Decorator input closed and drained.");
          return Ok(());
        }
      },
    };

    let decorated = handler(&message).map_err(|source| {
      event!(Level::ERROR, error = %source, "Decorator handler rejected a payload.");
      ConveyorError::StageFailure {
        stage: label.clone(),
        source,
      }
    })?;

    tokio::select! {
      _ = token.cancelled() => {
        event!(Level::DEBUG, "Decorator observed cancellation while writing.");
        return Ok(());
      }
      sent = output.send(decorated) => sent?,
    }
  }
}
