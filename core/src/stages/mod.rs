// conveyor/src/stages/mod.rs

//! The three stage runtimes.
//!
//! Each runtime is an async function driving one registered stage to
//! completion. Every channel send and receive inside a runtime is a
//! suspension point that also races against the shared shutdown token — a
//! stage blocked writing into a full channel must abort on cancellation, not
//! wait unconditionally.

pub(crate) mod decorator;
pub(crate) mod multiplexer;
pub(crate) mod separator;

pub(crate) use decorator::run_decorator;
pub(crate) use multiplexer::run_multiplexer;
pub(crate) use separator::run_separator;
