// conveyor/src/core/handler.rs

//! Handler type aliases — the seam between the engine and its collaborators.
//!
//! Handlers are plain synchronous closures over message text; the engine only
//! requires that they conform to these shapes. A fallible handler returning
//! `Err` signals an unrecoverable domain condition (a "poisoned" payload),
//! which is fatal to the whole pipeline.

use std::sync::Arc;

/// Transform applied by a decorator stage to every message, one output per
/// input. An `Err` aborts the pipeline with a `StageFailure`.
pub type DecoratorFn = Arc<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;

/// Filter applied by a multiplexer stage on each input: `true` forwards the
/// message to the shared output, `false` drops it.
pub type MultiplexerFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Transform applied by a separator stage before round-robin routing.
/// Fallible exactly like a decorator's transform.
pub type SeparatorFn = Arc<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;
