// conveyor/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and the stage registration
//! methods that build its wiring before a run.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{event, Level};

use crate::core::stage::StageDef;
use crate::registry::ChannelRegistry;

/// An in-process dataflow pipeline: a channel registry plus an ordered list
/// of stage descriptors.
///
/// Registration order has no bearing on execution order — every stage starts
/// concurrently when [`run`](Pipeline::run) is invoked. A pipeline is
/// single-run: once `run` returns, its channels are closed and the value
/// should be discarded. Multiple independent pipelines can be constructed and
/// run concurrently without interference; there is no process-wide state.
pub struct Pipeline {
  pub(crate) registry: Arc<ChannelRegistry>,
  pub(crate) stages: Vec<StageDef>,
  pub(crate) consumed: AtomicBool,
}

impl Pipeline {
  /// Creates an empty pipeline whose channels will all carry the given
  /// bounded capacity.
  ///
  /// A `buffer_size` of 0 is clamped to 1: tokio's bounded channels have no
  /// rendezvous mode.
  pub fn new(buffer_size: usize) -> Self {
    Self {
      registry: Arc::new(ChannelRegistry::new(buffer_size)),
      stages: Vec::new(),
      consumed: AtomicBool::new(false),
    }
  }

  /// Registers a 1 → 1 transforming stage. Resolves (creating on first
  /// reference) both named channels; spawns nothing yet.
  pub fn register_decorator<F>(&mut self, handler: F, input: &str, output: &str)
  where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
  {
    let stage = StageDef::Decorator {
      handler: Arc::new(handler),
      input: self.registry.get_or_create(input),
      output: self.registry.get_or_create(output),
    };
    event!(Level::DEBUG, stage = %stage.label(), "Registered stage.");
    self.stages.push(stage);
  }

  /// Registers an N → 1 fan-in stage. The filter decides per message whether
  /// it qualifies for forwarding to the shared output.
  pub fn register_multiplexer<F>(&mut self, handler: F, inputs: &[&str], output: &str)
  where
    F: Fn(&str) -> bool + Send + Sync + 'static,
  {
    let stage = StageDef::Multiplexer {
      handler: Arc::new(handler),
      inputs: inputs.iter().map(|name| self.registry.get_or_create(name)).collect(),
      output: self.registry.get_or_create(output),
    };
    event!(Level::DEBUG, stage = %stage.label(), "Registered stage.");
    self.stages.push(stage);
  }

  /// Registers a 1 → N round-robin fan-out stage. An empty `outputs` slice is
  /// valid; such a stage terminates immediately when run.
  pub fn register_separator<F>(&mut self, handler: F, input: &str, outputs: &[&str])
  where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
  {
    let stage = StageDef::Separator {
      handler: Arc::new(handler),
      input: self.registry.get_or_create(input),
      outputs: outputs.iter().map(|name| self.registry.get_or_create(name)).collect(),
    };
    event!(Level::DEBUG, stage = %stage.label(), "Registered stage.");
    self.stages.push(stage);
  }

  /// Number of registered stages.
  pub fn stage_count(&self) -> usize {
    self.stages.len()
  }

  /// Number of distinct channels the registered stages reference.
  pub fn channel_count(&self) -> usize {
    self.registry.channel_count()
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("stages", &self.stages)
      .field("channels", &self.registry.channel_count())
      .finish()
  }
}
