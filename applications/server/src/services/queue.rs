/// In-process implementation of the queue gateway
use crate::{
    config::QueueSettings,
    error::{Result, ServerError},
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, VecDeque},
    num::NonZeroUsize,
    sync::Arc,
};
use tokio::sync::Mutex;
use tuneshelf_core::QueueGateway;

const DEFAULT_CAPACITY: usize = 1_000;

/// Per-topic bounded FIFO of published payloads
///
/// Messages stay queued until a consumer pops or drains them. A topic holds at
/// most `capacity` messages; publishing onto a full topic drops its oldest
/// message. Clones share the same queues.
#[derive(Clone)]
pub struct InProcessQueue {
    topics: Arc<Mutex<HashMap<String, VecDeque<Vec<u8>>>>>,
    capacity: usize,
}

impl InProcessQueue {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.get(),
        }
    }

    pub fn from_settings(settings: &QueueSettings) -> Result<Self> {
        let capacity = NonZeroUsize::new(settings.capacity).ok_or_else(|| {
            ServerError::Config("queue.capacity must be greater than zero".to_string())
        })?;
        Ok(Self::with_capacity(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the oldest message on `topic`
    pub async fn pop(&self, topic: &str) -> Option<Vec<u8>> {
        let mut topics = self.topics.lock().await;
        topics.get_mut(topic).and_then(VecDeque::pop_front)
    }

    /// Take every message on `topic`, oldest first
    pub async fn drain(&self, topic: &str) -> Vec<Vec<u8>> {
        let mut topics = self.topics.lock().await;
        topics
            .remove(topic)
            .map(Vec::from)
            .unwrap_or_default()
    }

    pub async fn len(&self, topic: &str) -> usize {
        let topics = self.topics.lock().await;
        topics.get(topic).map_or(0, VecDeque::len)
    }
}

impl Default for InProcessQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueGateway for InProcessQueue {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> tuneshelf_core::Result<()> {
        let mut topics = self.topics.lock().await;
        let queue = topics.entry(topic.to_string()).or_default();

        if queue.len() >= self.capacity {
            queue.pop_front();
            tracing::warn!(
                "Topic {} is full ({} messages), dropped oldest message",
                topic,
                self.capacity
            );
        }

        queue.push_back(payload);
        tracing::info!("Published message on {} ({} pending)", topic, queue.len());
        Ok(())
    }
}
