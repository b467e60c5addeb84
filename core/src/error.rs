// conveyor/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConveyorError {
  /// A boundary `send`/`recv` named a channel no stage registration ever
  /// referenced. Local to the caller; never affects a running pipeline.
  #[error("Channel not found: {name}")]
  ChannelNotFound { name: String },

  /// The channel was already closed by the orchestrator's shutdown pass.
  #[error("Channel '{name}' is closed")]
  ChannelClosed { name: String },

  /// A handler signalled an unrecoverable domain condition (e.g. a poisoned
  /// payload). Fatal: the whole pipeline unwinds and `run` returns this.
  #[error("Stage '{stage}' failed. Source: {source}")]
  StageFailure {
    stage: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Internal conveyor error: {0}")]
  Internal(String),
}

pub type ConveyorResult<T, E = ConveyorError> = std::result::Result<T, E>;
