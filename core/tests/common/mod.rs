// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::Arc;

use conveyor::{ConveyorResult, Pipeline, ShutdownToken};
use tokio::task::JoinHandle;
use tracing::Level;

// --- Common Handler Builders ---

/// The transform used across tests: `"x"` becomes `"decorated: x"`.
pub fn prefix_decorator() -> impl Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static {
  |msg: &str| anyhow::Ok(format!("decorated: {msg}"))
}

/// Like `prefix_decorator`, but a payload equal to `poison` is fatal.
pub fn poisonable_decorator(
  poison: &'static str,
) -> impl Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static {
  move |msg: &str| {
    if msg == poison {
      anyhow::bail!("poisoned payload: {msg}");
    }
    Ok(format!("decorated: {msg}"))
  }
}

/// Pass-through separator transform.
pub fn identity() -> impl Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static {
  |msg: &str| anyhow::Ok(msg.to_string())
}

/// Multiplexer filter that keeps everything.
pub fn keep_all() -> impl Fn(&str) -> bool + Send + Sync + 'static {
  |_: &str| true
}

/// Multiplexer filter dropping messages that contain `needle`.
pub fn drop_containing(needle: &'static str) -> impl Fn(&str) -> bool + Send + Sync + 'static {
  move |msg: &str| !msg.contains(needle)
}

// --- Run Helper ---

/// Launches `pipeline.run` as a background task, the way callers use it.
pub fn spawn_run(pipeline: &Arc<Pipeline>, token: ShutdownToken) -> JoinHandle<ConveyorResult<()>> {
  let pipeline = Arc::clone(pipeline);
  tokio::spawn(async move { pipeline.run(token).await })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
