// conveyor/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` orchestrator: spawn every stage
//! concurrently, capture the first fatal failure, cancel siblings, wait for
//! the full unwind, then close all channels exactly once.

use std::sync::atomic::Ordering;

use tokio::task::JoinSet;
use tracing::{event, instrument, Level};

use crate::error::{ConveyorError, ConveyorResult};
use crate::pipeline::definition::Pipeline;
use crate::shutdown::{shutdown_channel, ShutdownToken};

impl Pipeline {
  /// Executes every registered stage to completion.
  ///
  /// The caller supplies the external cancellation token (typically with a
  /// deadline task holding the handle) and usually launches `run` as a
  /// background task while feeding/draining boundary channels.
  ///
  /// Exit contract:
  /// - the first captured stage failure is returned; later stage errors
  ///   (expected once cancellation fires) are discarded;
  /// - external cancellation is graceful and returns `Ok(())`;
  /// - no stage task is left running after `run` returns — every task is
  ///   joined before the channels are closed and the result surfaces.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            num_stages = self.stages.len(),
            num_channels = self.registry.channel_count(),
        ),
        err(Display)
    )]
  pub async fn run(&self, shutdown: ShutdownToken) -> ConveyorResult<()> {
    if self.consumed.swap(true, Ordering::SeqCst) {
      return Err(ConveyorError::Internal(
        "pipeline already ran; a pipeline is single-run".to_string(),
      ));
    }

    event!(Level::DEBUG, "Run entered; spawning stage tasks.");

    // Internal trigger: fires on the first stage failure or when the external
    // token cancels, so every stage observes cancellation at its next
    // suspension point. The handle stays alive for the whole join loop.
    let (trigger, stage_token) = shutdown_channel();

    let mut tasks: JoinSet<ConveyorResult<()>> = JoinSet::new();
    for stage in &self.stages {
      tasks.spawn(stage.clone().run(stage_token.clone()));
    }

    let mut first_error: Option<ConveyorError> = None;
    let mut draining = false;

    loop {
      tokio::select! {
        _ = shutdown.cancelled(), if !draining => {
          event!(Level::INFO, "External cancellation observed; draining stages.");
          draining = true;
          trigger.trigger();
        }
        joined = tasks.join_next() => {
          let Some(joined) = joined else { break };
          match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
              if first_error.is_none() {
                event!(Level::ERROR, error = %err, "Stage failed; cancelling siblings.");
                first_error = Some(err);
              } else {
                event!(Level::DEBUG, error = %err, "Discarding stage error after the first failure.");
              }
              draining = true;
              trigger.trigger();
            }
            Err(join_err) => {
              if first_error.is_none() {
                first_error = Some(ConveyorError::Internal(format!(
                  "stage task panicked: {join_err}"
                )));
              }
              draining = true;
              trigger.trigger();
            }
          }
        }
      }
    }

    // Every stage task has returned; the single close pass cannot race a
    // stage write and it releases any boundary reader still blocked.
    event!(Level::DEBUG, "All stage tasks joined; closing channels.");
    self.registry.close_all();

    match first_error {
      Some(err) => Err(err),
      None => {
        event!(Level::DEBUG, "Run completed.");
        Ok(())
      }
    }
  }
}
