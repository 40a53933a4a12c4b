//! In-memory implementation of the KvStore trait for testing and development

use crate::{KvStore, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// KvStore implementation using a concurrent in-process map
///
/// This implementation is suitable for:
/// - Unit and integration tests (no external dependencies)
/// - Local development without a NATS server
///
/// Expiry is lazy: expired entries are invisible to every accessor and are
/// dropped by [`InMemoryKv::purge_expired`]. Time is read from
/// `tokio::time::Instant`, so tests can drive expiry with a paused clock.
///
/// Clones share the same underlying map.
///
/// # Example
/// ```rust
/// use kv_store::{InMemoryKv, KvStore};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let kv = InMemoryKv::new();
/// kv.put("k", b"v".to_vec(), Duration::from_secs(60)).await?;
/// assert_eq!(kv.get("k"), Some(b"v".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryKv {
    entries: Arc<DashMap<String, Entry>>,
}

impl InMemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, or None if absent or expired
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Remaining time-to-live of `key`, or None if absent or expired
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.expires_at - now)
    }

    /// Keys of all live entries, sorted
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before - self.entries.len()
    }
}

#[async_trait]
impl KvStore for InMemoryKv {
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "inmemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn test_put_and_get() {
        let kv = InMemoryKv::new();
        kv.put("analytics:1:a", b"{\"event\":\"x\"}".to_vec(), DAY)
            .await
            .unwrap();

        assert_eq!(kv.get("analytics:1:a"), Some(b"{\"event\":\"x\"}".to_vec()));
        assert_eq!(kv.get("analytics:1:b"), None);
        assert_eq!(kv.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let kv = InMemoryKv::new();
        let view = kv.clone();

        kv.put("k", b"v".to_vec(), DAY).await.unwrap();

        assert_eq!(view.keys(), vec!["k".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let kv = InMemoryKv::new();
        kv.put("short", b"1".to_vec(), Duration::from_secs(10))
            .await
            .unwrap();
        kv.put("long", b"2".to_vec(), DAY).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.ttl("short"), Some(Duration::from_secs(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(kv.get("short"), None);
        assert_eq!(kv.keys(), vec!["long".to_string()]);

        assert_eq!(kv.purge_expired(), 1);
        assert_eq!(kv.purge_expired(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_writes_under_distinct_keys() {
        let kv = InMemoryKv::new();

        let mut handles = Vec::new();
        for i in 0..32 {
            let kv = kv.clone();
            handles.push(tokio::spawn(async move {
                kv.put(&format!("key-{i}"), vec![i as u8], DAY).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(kv.len(), 32);
        assert_eq!(kv.get("key-7"), Some(vec![7]));
    }

    #[tokio::test]
    async fn test_ping_and_backend() {
        let kv = InMemoryKv::new();
        assert!(kv.ping().await.is_ok());
        assert_eq!(kv.backend(), "inmemory");
    }
}
