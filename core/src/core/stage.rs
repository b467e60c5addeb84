// conveyor/src/core/stage.rs

//! Stage descriptors: the closed set of wiring shapes a pipeline supports.
//!
//! Dispatch is by pattern match on this enum — there is deliberately no
//! runtime type assertion and no open trait for stage kinds. Each variant
//! carries its strongly-typed handler and the channel endpoints resolved at
//! registration time; descriptors are immutable once registered.

use std::sync::Arc;

use super::channel::Channel;
use super::handler::{DecoratorFn, MultiplexerFn, SeparatorFn};
use crate::error::ConveyorResult;
use crate::shutdown::ShutdownToken;
use crate::stages;

#[derive(Clone)]
pub(crate) enum StageDef {
  /// 1 → 1 transforming stage.
  Decorator {
    handler: DecoratorFn,
    input: Arc<Channel>,
    output: Arc<Channel>,
  },
  /// N → 1 fan-in/merge stage.
  Multiplexer {
    handler: MultiplexerFn,
    inputs: Vec<Arc<Channel>>,
    output: Arc<Channel>,
  },
  /// 1 → N fan-out/round-robin stage.
  Separator {
    handler: SeparatorFn,
    input: Arc<Channel>,
    outputs: Vec<Arc<Channel>>,
  },
}

impl StageDef {
  /// Human-readable wiring label, used in errors and tracing.
  pub(crate) fn label(&self) -> String {
    match self {
      StageDef::Decorator { input, output, .. } => {
        format!("decorator({}->{})", input.name(), output.name())
      }
      StageDef::Multiplexer { inputs, output, .. } => {
        let names: Vec<&str> = inputs.iter().map(|c| c.name()).collect();
        format!("multiplexer([{}]->{})", names.join(","), output.name())
      }
      StageDef::Separator { input, outputs, .. } => {
        let names: Vec<&str> = outputs.iter().map(|c| c.name()).collect();
        format!("separator({}->[{}])", input.name(), names.join(","))
      }
    }
  }

  /// Executes this stage's runtime to completion (input exhaustion,
  /// cancellation, or fatal failure).
  pub(crate) async fn run(self, token: ShutdownToken) -> ConveyorResult<()> {
    let label = self.label();
    match self {
      StageDef::Decorator {
        handler,
        input,
        output,
      } => stages::run_decorator(label, handler, input, output, token).await,
      StageDef::Multiplexer {
        handler,
        inputs,
        output,
      } => stages::run_multiplexer(label, handler, inputs, output, token).await,
      StageDef::Separator {
        handler,
        input,
        outputs,
      } => stages::run_separator(label, handler, input, outputs, token).await,
    }
  }
}

// Handlers (Arc<dyn Fn...>) don't implement Debug; show the wiring instead.
impl std::fmt::Debug for StageDef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StageDef").field("label", &self.label()).finish()
  }
}
