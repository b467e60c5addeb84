// conveyor/src/lib.rs

//! Conveyor: an in-process dataflow engine built on named, bounded channels.
//!
//! A conveyor wires string messages through three kinds of concurrent stages:
//!  - **Decorator** (1 input → 1 output): transforms each message, preserving order.
//!  - **Multiplexer** (N inputs → 1 output): merges inputs, dropping messages
//!    that fail the stage's filter.
//!  - **Separator** (1 input → N outputs): distributes messages round-robin.
//!
//! All registered stages run simultaneously under one cancellable scope. The
//! first fatal stage failure cancels every sibling; channels are closed exactly
//! once, after every stage task has unwound. External cancellation takes the
//! same unwind path but is reported as success.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod shutdown;

mod registry;
mod stages;

// --- Re-exports for the Public API ---

pub use crate::core::handler::{DecoratorFn, MultiplexerFn, SeparatorFn};
pub use crate::error::{ConveyorError, ConveyorResult};
pub use crate::pipeline::boundary::DRAINED;
pub use crate::pipeline::definition::Pipeline;
pub use crate::shutdown::{shutdown_channel, ShutdownHandle, ShutdownToken};

/*
    Core Workflow:
    1. Create a `Pipeline` with a channel buffer size: `Pipeline::new(8)`.
    2. Register stages; every channel name referenced is created on first use:
       - `pipeline.register_decorator(transform, "in", "mid")`
       - `pipeline.register_separator(transform, "mid", &["a", "b"])`
       - `pipeline.register_multiplexer(filter, &["a", "b"], "out")`
    3. Create a shutdown pair: `let (handle, token) = shutdown_channel();`.
    4. Launch `pipeline.run(token)` as a background task (the pipeline is
       usually shared via `Arc` so the caller can keep using it).
    5. Feed and drain boundary channels concurrently with the run:
       `pipeline.send("in", "x").await?` / `pipeline.recv("out").await?`.
    6. Trigger `handle.trigger()` when done (or on a deadline); `run` returns
       the first stage failure if one occurred, `Ok(())` otherwise.
*/
