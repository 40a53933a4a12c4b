//! # KvStore Abstraction
//!
//! Write-side abstraction over the key-value backend analytics payloads are
//! persisted to. Every write carries a time-to-live; the backend is
//! responsible for expiring the entry.
//!
//! ## Implementations
//!
//! - **NatsKv**: Production implementation using a NATS JetStream key-value bucket
//! - **InMemoryKv**: Test/dev implementation backed by a concurrent map
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kv_store::{InMemoryKv, KvStore, NatsKv};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retention = Duration::from_secs(2_592_000);
//!
//! // Production: NATS JetStream KV
//! let nats_client = async_nats::connect("nats://localhost:4222").await?;
//! let store: Arc<dyn KvStore> =
//!     Arc::new(NatsKv::connect(nats_client, "ANALYTICS", retention).await?);
//!
//! // Dev/Test: In-Memory
//! let store: Arc<dyn KvStore> = Arc::new(InMemoryKv::new());
//!
//! store.put("analytics:1700000000000:abc", b"{}".to_vec(), retention).await?;
//! # Ok(())
//! # }
//! ```

mod inmemory_kv;
mod nats_kv;

pub use inmemory_kv::InMemoryKv;
pub use nats_kv::NatsKv;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur when writing to the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write entry: {0}")]
    PutError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Core key-value store abstraction
///
/// Writers never read back what they stored, so the trait is write-only.
/// Implementations must accept concurrent writes under distinct keys without
/// external locking.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`, expiring it `ttl` after the write
    ///
    /// # Returns
    /// * `Ok(())` once the backend has acknowledged the write
    /// * `Err(StoreError)` if the write failed; nothing is retried
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()>;

    /// Cheap liveness probe used by readiness checks
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}

impl fmt::Debug for dyn KvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KvStore({})", self.backend())
    }
}
