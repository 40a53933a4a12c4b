//! Queue-backed [`Beacon`].
//!
//! `send_beacon` only enqueues, so it never blocks the caller. A background
//! worker posts queued bodies one at a time. [`BeaconQueue::flush`] closes
//! the queue and waits for the worker to attempt everything already
//! accepted, which is what makes beacons survive teardown.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::AnalyticsConfig;
use crate::delivery::Beacon;
use crate::error::ClientError;

type Queued = (String, String);

pub struct BeaconQueue {
    sender: Mutex<Option<mpsc::UnboundedSender<Queued>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BeaconQueue {
    /// Start the worker on the current tokio runtime
    pub fn spawn(config: &AnalyticsConfig) -> Result<Arc<Self>, ClientError> {
        let handle = Handle::try_current().map_err(|_| ClientError::NoRuntime)?;
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = handle.spawn(run_worker(client, receiver));

        Ok(Arc::new(Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }))
    }

    /// Stop accepting beacons and wait until every accepted one was attempted
    pub async fn flush(&self) {
        // Dropping the only sender closes the channel once the queue drains
        drop(
            self.sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::debug!(error = %e, "beacon worker ended abnormally");
            }
        }
    }
}

impl Beacon for BeaconQueue {
    fn send_beacon(&self, url: &str, body: String) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => sender.send((url.to_string(), body)).is_ok(),
            None => false,
        }
    }
}

async fn run_worker(client: Client, mut receiver: mpsc::UnboundedReceiver<Queued>) {
    while let Some((url, body)) = receiver.recv().await {
        let result = client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(%url, status = %response.status(), "beacon rejected");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(%url, error = %e, "beacon delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_flush_closes_queue() {
        let config = AnalyticsConfig::new("http://127.0.0.1:9/track")
            .unwrap()
            .with_request_timeout(Duration::from_millis(200));
        let queue = BeaconQueue::spawn(&config).unwrap();

        assert!(queue.send_beacon(&config.endpoint, "{}".to_string()));

        // Delivery fails (nothing listens), flush still completes
        tokio::time::timeout(Duration::from_secs(5), queue.flush())
            .await
            .expect("flush should finish once the queue is drained");

        assert!(!queue.send_beacon(&config.endpoint, "{}".to_string()));

        // Second flush is a no-op
        queue.flush().await;
    }

    #[test]
    fn test_spawn_requires_runtime() {
        assert!(matches!(
            BeaconQueue::spawn(&AnalyticsConfig::default()),
            Err(ClientError::NoRuntime)
        ));
    }
}
