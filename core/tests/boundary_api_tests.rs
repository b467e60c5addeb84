// tests/boundary_api_tests.rs
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use conveyor::{shutdown_channel, ConveyorError, Pipeline, DRAINED};

#[tokio::test]
async fn test_send_and_recv_on_unregistered_name_fail() {
  setup_tracing();
  let mut pipeline = Pipeline::new(4);
  pipeline.register_decorator(prefix_decorator(), "in", "out");

  let err = pipeline.send("nowhere", "x").await.expect_err("unknown name");
  assert!(matches!(err, ConveyorError::ChannelNotFound { ref name } if name == "nowhere"));

  let err = pipeline.recv("nowhere").await.expect_err("unknown name");
  assert!(matches!(err, ConveyorError::ChannelNotFound { ref name } if name == "nowhere"));
}

#[tokio::test]
async fn test_drained_recv_is_a_sentinel_not_an_error() {
  setup_tracing();
  let mut pipeline = Pipeline::new(4);
  pipeline.register_separator(identity(), "in", &[]);

  let pipeline = Arc::new(pipeline);
  let (_handle, token) = shutdown_channel();
  spawn_run(&pipeline, token).await.unwrap().unwrap();

  // Registered name, closed and empty: sentinel with no error. This must be
  // distinguishable from the unregistered-name case above.
  assert_eq!(pipeline.recv("in").await.unwrap(), DRAINED);

  // And a send against the closed channel is an error, not a silent drop.
  let err = pipeline.send("in", "late").await.expect_err("channel is closed");
  assert!(matches!(err, ConveyorError::ChannelClosed { ref name } if name == "in"));
}

#[tokio::test]
async fn test_send_blocks_on_full_buffer() {
  setup_tracing();
  let mut pipeline = Pipeline::new(1);
  pipeline.register_decorator(prefix_decorator(), "in", "out");

  // No run in flight, so nothing consumes "in": the first send fills the
  // buffer and the second must block (backpressure), not drop or error.
  pipeline.send("in", "first").await.unwrap();
  let second = tokio::time::timeout(Duration::from_millis(100), pipeline.send("in", "second")).await;
  assert!(second.is_err(), "send on a full channel must block");
}

#[tokio::test]
async fn test_recv_sees_messages_buffered_before_close() {
  setup_tracing();
  let mut pipeline = Pipeline::new(4);
  pipeline.register_multiplexer(keep_all(), &["feed"], "out");

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();
  let run = spawn_run(&pipeline, token);

  pipeline.send("feed", "one").await.unwrap();
  pipeline.send("feed", "two").await.unwrap();
  assert_eq!(pipeline.recv("out").await.unwrap(), "one");
  assert_eq!(pipeline.recv("out").await.unwrap(), "two");

  handle.trigger();
  run.await.unwrap().unwrap();

  // After shutdown the drained channel keeps answering with the sentinel.
  assert_eq!(pipeline.recv("out").await.unwrap(), DRAINED);
  assert_eq!(pipeline.recv("out").await.unwrap(), DRAINED);
}
