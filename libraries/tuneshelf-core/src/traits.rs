//! Gateway traits for the non-database collaborators
//!
//! Implementations are constructed once at startup and injected into the
//! services as `Arc<dyn ...>` handles, so tests can swap in doubles.

use crate::error::Result;
use async_trait::async_trait;

/// Outcome of a cache read
///
/// A missing entry is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Entry present
    Hit(String),
    /// Entry absent or expired
    Miss,
}

impl CacheLookup {
    /// Returns the cached value, if any
    pub fn into_value(self) -> Option<String> {
        match self {
            CacheLookup::Hit(value) => Some(value),
            CacheLookup::Miss => None,
        }
    }
}

/// Key/value cache
///
/// The core never passes an expiry; whether entries expire is up to the
/// implementation's configuration.
#[async_trait]
pub trait CacheGateway: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<CacheLookup>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a value; removing an absent key succeeds
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Durable message publisher
///
/// Fire-and-forget: a successful `publish` only means the message was handed
/// off, not that anything consumed it.
#[async_trait]
pub trait QueueGateway: Send + Sync {
    /// Publish `payload` on `topic`
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;
}
