// textflow/src/main.rs

//! Thin CLI demo for the conveyor engine.
//!
//! Wires one fixed graph — Decorator("in"→"mid") feeding
//! Separator("mid"→["odd","even"]) feeding Multiplexer(["odd","even"]→"out")
//! — then drives it with boundary send/recv calls, timed against a deadline.
//! The handlers are the usual toy collaborators: a prefix transform with a
//! poison payload, and an optional substring drop filter.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use conveyor::{shutdown_channel, Pipeline, DRAINED};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "textflow", about = "Drive a small conveyor graph from the command line")]
struct Args {
  /// Bounded capacity for every channel in the graph.
  #[arg(long, default_value_t = 8)]
  buffer: usize,

  /// Deadline for the whole run, in milliseconds.
  #[arg(long, default_value_t = 2_000)]
  deadline_ms: u64,

  /// Prefix applied by the decorator stage.
  #[arg(long, default_value = "decorated: ")]
  prefix: String,

  /// Payload that makes the decorator abort the whole pipeline.
  #[arg(long, default_value = "poison")]
  poison: String,

  /// Drop messages containing this substring at the multiplexer.
  #[arg(long)]
  drop_containing: Option<String>,

  /// Messages to feed into the graph.
  #[arg(required = true)]
  messages: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args = Args::parse();

  let mut pipeline = Pipeline::new(args.buffer);
  let prefix = args.prefix.clone();
  let poison = args.poison.clone();
  pipeline.register_decorator(
    move |msg: &str| {
      if msg == poison {
        anyhow::bail!("poisoned payload: {msg}");
      }
      Ok(format!("{prefix}{msg}"))
    },
    "in",
    "mid",
  );
  pipeline.register_separator(|msg: &str| anyhow::Ok(msg.to_string()), "mid", &["odd", "even"]);
  let drop_needle = args.drop_containing.clone();
  pipeline.register_multiplexer(
    move |msg: &str| drop_needle.as_deref().map_or(true, |needle| !msg.contains(needle)),
    &["odd", "even"],
    "out",
  );

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();
  let handle = Arc::new(handle);

  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  // The engine carries no timers; the deadline is this task's job.
  tokio::spawn({
    let handle = Arc::clone(&handle);
    let deadline = Duration::from_millis(args.deadline_ms);
    async move {
      tokio::time::sleep(deadline).await;
      warn!("deadline reached; triggering shutdown");
      handle.trigger();
    }
  });

  // How many messages should come out the far end: everything that isn't the
  // poison and wouldn't be dropped by the filter.
  let expected = args
    .messages
    .iter()
    .filter(|msg| msg.as_str() != args.poison)
    .filter(|msg| {
      let decorated = format!("{}{}", args.prefix, msg);
      args.drop_containing.as_deref().map_or(true, |needle| !decorated.contains(needle))
    })
    .count();

  for msg in &args.messages {
    if let Err(err) = pipeline.send("in", msg.clone()).await {
      warn!("input rejected: {err}");
      break;
    }
  }

  for _ in 0..expected {
    let value = pipeline.recv("out").await?;
    if value == DRAINED {
      info!("output drained early");
      break;
    }
    println!("{value}");
  }

  handle.trigger();
  match run.await.expect("run task panicked") {
    Ok(()) => info!("pipeline completed"),
    Err(err) => {
      warn!("pipeline failed: {err}");
      return Err(err.into());
    }
  }
  Ok(())
}
