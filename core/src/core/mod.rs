// conveyor/src/core/mod.rs

pub mod channel;
pub mod handler;
pub mod stage;

// Re-export key types for easier access from other conveyor modules (and lib.rs)
pub use handler::{DecoratorFn, MultiplexerFn, SeparatorFn};

pub(crate) use channel::Channel;
pub(crate) use stage::StageDef;
