// conveyor/src/stages/multiplexer.rs

//! Multiplexer runtime: N inputs → 1 output fan-in.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{event, instrument, Level};

use crate::core::channel::Channel;
use crate::core::handler::MultiplexerFn;
use crate::error::{ConveyorError, ConveyorResult};
use crate::shutdown::ShutdownToken;

/// Merges every input channel into the shared output.
///
/// One forwarder task runs per input; each forwards qualifying messages
/// (those the filter accepts) in its own input's arrival order. There is no
/// ordering guarantee across different inputs. Concurrent writes to the one
/// output need no extra locking — channel send is the sole synchronisation.
/// The stage as a whole ends only once every input is closed and drained, or
/// cancellation fires.
#[instrument(name = "multiplexer_stage", skip_all, fields(stage = %label))]
pub(crate) async fn run_multiplexer(
  label: String,
  handler: MultiplexerFn,
  inputs: Vec<Arc<Channel>>,
  output: Arc<Channel>,
  token: ShutdownToken,
) -> ConveyorResult<()> {
  event!(Level::DEBUG, inputs = inputs.len(), "Multiplexer stage starting.");

  let mut forwarders: JoinSet<ConveyorResult<()>> = JoinSet::new();
  for input in inputs {
    let handler = Arc::clone(&handler);
    let output = Arc::clone(&output);
    let token = token.clone();
    forwarders.spawn(forward_input(handler, input, output, token));
  }

  let mut first_error: Option<ConveyorError> = None;
  while let Some(joined) = forwarders.join_next().await {
    match joined {
      Ok(Ok(())) => {}
      Ok(Err(err)) => {
        if first_error.is_none() {
          first_error = Some(err);
        }
      }
      Err(join_err) => {
        if first_error.is_none() {
          first_error = Some(ConveyorError::Internal(format!(
            "multiplexer forwarder panicked: {join_err}"
          )));
        }
      }
    }
  }

  match first_error {
    Some(err) => Err(err),
    None => {
      event!(Level::DEBUG, "Multiplexer stage finished.");
      Ok(())
    }
  }
}

/// Forwards one input channel until it is closed and drained or cancellation
/// is observed.
async fn forward_input(
  handler: MultiplexerFn,
  input: Arc<Channel>,
  output: Arc<Channel>,
  token: ShutdownToken,
) -> ConveyorResult<()> {
  loop {
    let message = tokio::select! {
      _ = token.cancelled() => return Ok(()),
      received = input.recv() => match received {
        Some(message) => message,
        None => return Ok(()),
      },
    };

    if !handler(&message) {
      event!(Level::TRACE, channel = input.name(), "Multiplexer dropped a message.");
      continue;
    }

    tokio::select! {
      _ = token.cancelled() => return Ok(()),
      sent = output.send(message) => sent?,
    }
  }
}
