// conveyor/src/registry.rs

//! The name → channel registry owned by a pipeline.
//!
//! Channels are created lazily, exactly once per name, with the capacity fixed
//! at pipeline construction; a name resolves to the same channel instance for
//! the pipeline's lifetime. The map's mutex is contended only during the
//! registration phase and the orchestrator's final close pass — steady-state
//! stage execution synchronises through the channels themselves.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{event, Level};

use crate::core::Channel;

#[derive(Debug)]
pub(crate) struct ChannelRegistry {
  capacity: usize,
  channels: Mutex<HashMap<String, Arc<Channel>>>,
}

impl ChannelRegistry {
  pub(crate) fn new(capacity: usize) -> Self {
    Self {
      capacity,
      channels: Mutex::new(HashMap::new()),
    }
  }

  /// Idempotent lookup-or-create. Thread-safe under concurrent registration.
  pub(crate) fn get_or_create(&self, name: &str) -> Arc<Channel> {
    let mut channels = self.channels.lock();
    if let Some(existing) = channels.get(name) {
      return Arc::clone(existing);
    }
    event!(Level::DEBUG, channel = name, capacity = self.capacity, "Creating channel.");
    let created = Arc::new(Channel::new(name, self.capacity));
    channels.insert(name.to_string(), Arc::clone(&created));
    created
  }

  /// Lookup for the boundary API; never creates.
  pub(crate) fn get(&self, name: &str) -> Option<Arc<Channel>> {
    self.channels.lock().get(name).cloned()
  }

  /// Closes every channel exactly once. Orchestrator-only, after all stage
  /// tasks have joined; this both avoids send-on-closed races and
  /// releases any reader still blocked on a drained channel.
  pub(crate) fn close_all(&self) {
    let channels = self.channels.lock();
    event!(Level::DEBUG, count = channels.len(), "Closing all channels.");
    for channel in channels.values() {
      channel.close();
    }
  }

  pub(crate) fn channel_count(&self) -> usize {
    self.channels.lock().len()
  }
}
