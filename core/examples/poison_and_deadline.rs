// conveyor/examples/poison_and_deadline.rs

use std::sync::Arc;
use std::time::Duration;

use conveyor::{shutdown_channel, Pipeline, DRAINED};
use tracing::{info, warn};

// Demonstrates the two ways a run ends early:
//  - a poisoned payload makes a handler fail, which is fatal and surfaces
//    from `run`;
//  - an external deadline triggers the shutdown handle, which is graceful
//    and reported as success.

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  // --- Fatal: poisoned payload ---
  let mut pipeline = Pipeline::new(8);
  pipeline.register_decorator(
    |msg: &str| {
      if msg == "poison" {
        anyhow::bail!("poisoned payload: {msg}");
      }
      Ok(format!("decorated: {msg}"))
    },
    "in",
    "out",
  );

  let pipeline = Arc::new(pipeline);
  let (_handle, token) = shutdown_channel();
  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  pipeline.send("in", "fine").await.unwrap();
  pipeline.send("in", "poison").await.unwrap();

  match run.await.expect("run task panicked") {
    Ok(()) => warn!("expected the poison to be fatal"),
    Err(err) => info!("run failed as designed: {err}"),
  }
  // The survivor is still readable; afterwards the drained sentinel appears.
  info!("buffered survivor: {}", pipeline.recv("out").await.unwrap());
  assert_eq!(pipeline.recv("out").await.unwrap(), DRAINED);

  // --- Graceful: external deadline ---
  let mut pipeline = Pipeline::new(8);
  pipeline.register_decorator(|msg: &str| anyhow::Ok(msg.to_uppercase()), "in", "out");

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();
  let handle = Arc::new(handle);
  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  // The engine has no timers; the deadline is a plain task of the caller's.
  tokio::spawn({
    let handle = Arc::clone(&handle);
    async move {
      tokio::time::sleep(Duration::from_millis(200)).await;
      handle.trigger();
    }
  });

  pipeline.send("in", "quiet").await.unwrap();
  info!("received before the deadline: {}", pipeline.recv("out").await.unwrap());

  match run.await.expect("run task panicked") {
    Ok(()) => info!("deadline fired; run reported graceful success"),
    Err(err) => warn!("unexpected failure: {err}"),
  }
}
