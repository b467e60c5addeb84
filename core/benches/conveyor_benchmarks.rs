use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

use conveyor::{shutdown_channel, Pipeline};

// --- Helper: build, run, and drain one graph ---

async fn pump_decorator_chain(messages: usize, buffer: usize) {
  let mut pipeline = Pipeline::new(buffer);
  pipeline.register_decorator(|msg: &str| anyhow::Ok(format!("decorated: {msg}")), "in", "out");

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();
  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  for i in 0..messages {
    pipeline.send("in", format!("m{i}")).await.unwrap();
    // Drain as we go so the bounded buffer never stalls the feed.
    let _ = pipeline.recv("out").await.unwrap();
  }

  handle.trigger();
  run.await.unwrap().unwrap();
}

async fn pump_fan_out_fan_in(messages: usize, buffer: usize) {
  let mut pipeline = Pipeline::new(buffer);
  pipeline.register_decorator(|msg: &str| anyhow::Ok(format!("decorated: {msg}")), "in", "mid");
  pipeline.register_separator(|msg: &str| anyhow::Ok(msg.to_string()), "mid", &["a", "b"]);
  pipeline.register_multiplexer(|_: &str| true, &["a", "b"], "out");

  let pipeline = Arc::new(pipeline);
  let (handle, token) = shutdown_channel();
  let run = tokio::spawn({
    let pipeline = Arc::clone(&pipeline);
    async move { pipeline.run(token).await }
  });

  for i in 0..messages {
    pipeline.send("in", format!("m{i}")).await.unwrap();
    let _ = pipeline.recv("out").await.unwrap();
  }

  handle.trigger();
  run.await.unwrap().unwrap();
}

// --- Benchmark Functions ---

fn bench_decorator_throughput(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("decorator_throughput");
  for &messages in &[64usize, 512] {
    group.throughput(Throughput::Elements(messages as u64));
    group.bench_with_input(BenchmarkId::from_parameter(messages), &messages, |b, &messages| {
      b.to_async(&rt).iter(|| pump_decorator_chain(messages, 32));
    });
  }
  group.finish();
}

fn bench_fan_out_fan_in(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("fan_out_fan_in");
  for &messages in &[64usize, 512] {
    group.throughput(Throughput::Elements(messages as u64));
    group.bench_with_input(BenchmarkId::from_parameter(messages), &messages, |b, &messages| {
      b.to_async(&rt).iter(|| pump_fan_out_fan_in(messages, 32));
    });
  }
  group.finish();
}

criterion_group!(benches, bench_decorator_throughput, bench_fan_out_fan_in);
criterion_main!(benches);
