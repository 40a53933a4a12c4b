//! Delivery policy.
//!
//! Ordered preference, first available wins:
//!
//! 1. a [`Beacon`] if the host provides one
//! 2. otherwise a detached HTTP POST ([`FetchTransport`])
//!
//! Neither path reports back to the caller. Failures are logged at `debug`
//! and dropped: no retry, no queueing for later, no backoff.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::config::AnalyticsConfig;
use crate::error::ClientError;

/// Host-provided fire-and-forget sender that keeps working through teardown
pub trait Beacon: Send + Sync {
    /// Hand `body` off for delivery to `url`
    ///
    /// Returns whether the body was accepted for delivery. Callers ignore the
    /// result.
    fn send_beacon(&self, url: &str, body: String) -> bool;
}

/// Asynchronous POST whose outcome is discarded
#[derive(Clone)]
pub struct FetchTransport {
    client: Client,
}

impl FetchTransport {
    pub fn new(config: &AnalyticsConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client })
    }

    /// Spawn the request onto the current tokio runtime and return immediately
    pub fn send(&self, url: &str, body: String) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!(url, "no runtime for analytics request; dropping event");
                return;
            }
        };

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let url = url.to_string();

        handle.spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::debug!(%url, status = %response.status(), "analytics endpoint rejected event");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(%url, error = %e, "analytics request failed");
                }
            }
        });
    }
}

/// Chooses between beacon and fetch for every event
#[derive(Clone)]
pub struct Delivery {
    beacon: Option<Arc<dyn Beacon>>,
    fetch: FetchTransport,
}

impl Delivery {
    /// Fetch-only delivery
    pub fn new(config: &AnalyticsConfig) -> Result<Self, ClientError> {
        Ok(Self {
            beacon: None,
            fetch: FetchTransport::new(config)?,
        })
    }

    /// Prefer `beacon` over fetch
    pub fn with_beacon(mut self, beacon: Arc<dyn Beacon>) -> Self {
        self.beacon = Some(beacon);
        self
    }

    pub fn has_beacon(&self) -> bool {
        self.beacon.is_some()
    }

    pub fn send(&self, url: &str, body: String) {
        match &self.beacon {
            Some(beacon) => {
                if !beacon.send_beacon(url, body) {
                    tracing::debug!(url, "beacon refused analytics event");
                }
            }
            None => self.fetch.send(url, body),
        }
    }
}
