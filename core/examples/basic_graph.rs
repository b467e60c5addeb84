// conveyor/examples/basic_graph.rs

use std::sync::Arc;

use conveyor::{shutdown_channel, ConveyorError, Pipeline};
use tracing::info;

// A Decorator feeding a Separator feeding a Multiplexer: three messages go
// in on "in" and come back decorated on "out", in some interleaving.

#[tokio::main]
async fn main() -> Result<(), ConveyorError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Conveyor Graph ---");

  let mut pipeline = Pipeline::new(8);
  pipeline.register_decorator(|msg: &str| anyhow::Ok(format!("decorated: {msg}")), "in", "mid");
  pipeline.register_separator(|msg: &str| anyhow::Ok(msg.to_string()), "mid", &["odd", "even"]);
  pipeline.register_multiplexer(|_: &str| true, &["odd", "even"], "out");

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();

  // Run in the background; the boundary API is used concurrently with it.
  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  for payload in ["x", "y", "z"] {
    pipeline.send("in", payload).await?;
  }
  for _ in 0..3 {
    info!("received: {}", pipeline.recv("out").await?);
  }

  handle.trigger();
  run.await.expect("run task panicked")?;
  info!("pipeline drained and shut down");
  Ok(())
}
