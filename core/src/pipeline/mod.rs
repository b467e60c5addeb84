// conveyor/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction/registration, its
//! orchestrated execution, and the boundary send/recv API.

pub mod boundary;
pub mod definition;
pub mod execution;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
