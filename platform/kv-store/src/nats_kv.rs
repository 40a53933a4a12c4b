//! NATS JetStream key-value implementation of the KvStore trait

use crate::{KvStore, StoreError, StoreResult};
use async_nats::jetstream::{self, kv};
use async_nats::Client;
use async_trait::async_trait;
use std::time::Duration;

/// KvStore implementation using a NATS JetStream key-value bucket
///
/// Expiry is enforced by the bucket's `max_age`, which is set to the
/// retention passed to [`NatsKv::connect`] when the bucket is created. A
/// `ttl` passed to `put` that differs from the bucket's retention is logged
/// and the bucket retention still applies.
///
/// JetStream keys may not contain `:`, so `:` separators are mapped to `.`
/// before writing (`analytics:1:abc` is stored as `analytics.1.abc`).
///
/// # Example
/// ```rust,no_run
/// use kv_store::{KvStore, NatsKv};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = async_nats::connect("nats://localhost:4222").await?;
/// let store = NatsKv::connect(client, "ANALYTICS", Duration::from_secs(2_592_000)).await?;
/// store.put("analytics:1:abc", b"{}".to_vec(), Duration::from_secs(2_592_000)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NatsKv {
    client: Client,
    store: kv::Store,
    retention: Duration,
}

impl NatsKv {
    /// Open `bucket`, creating it with `retention` as its max age if missing
    pub async fn connect(client: Client, bucket: &str, retention: Duration) -> StoreResult<Self> {
        let js = jetstream::new(client.clone());

        let store = match js.get_key_value(bucket).await {
            Ok(store) => store,
            Err(_) => {
                tracing::info!(bucket, retention_secs = retention.as_secs(), "creating kv bucket");
                js.create_key_value(kv::Config {
                    bucket: bucket.to_string(),
                    history: 1,
                    max_age: retention,
                    ..Default::default()
                })
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?
            }
        };

        Ok(Self {
            client,
            store,
            retention,
        })
    }

    /// Get a reference to the underlying NATS client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Map a store key onto the JetStream key alphabet
    ///
    /// JetStream accepts `[-/_=.a-zA-Z0-9]` and rejects keys that start or
    /// end with `.`.
    fn subject_key(key: &str) -> StoreResult<String> {
        let mapped = key.replace(':', ".");

        let valid_chars = mapped
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '_' | '=' | '.'));

        if mapped.is_empty() || !valid_chars || mapped.starts_with('.') || mapped.ends_with('.') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(mapped)
    }
}

#[async_trait]
impl KvStore for NatsKv {
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        let subject_key = Self::subject_key(key)?;

        if ttl != self.retention {
            tracing::debug!(
                key,
                requested_secs = ttl.as_secs(),
                bucket_secs = self.retention.as_secs(),
                "per-entry ttl differs from bucket retention; bucket retention applies"
            );
        }

        self.store
            .put(subject_key, value.into())
            .await
            .map_err(|e| StoreError::PutError(e.to_string()))?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        if self.client.connection_state() != async_nats::connection::State::Connected {
            return Err(StoreError::ConnectionError("nats not connected".to_string()));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "nats"
    }
}
