use analytics_contracts::DEFAULT_ENDPOINT;
use reqwest::Url;
use std::env;
use std::time::Duration;

use crate::error::ClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the analytics emitter
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AnalyticsConfig {
    /// Configuration targeting `endpoint`, which must be an absolute http(s) URL
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;

        Ok(Self {
            endpoint,
            ..Self::default()
        })
    }

    /// Load configuration from `ANALYTICS_ENDPOINT` and `ANALYTICS_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let mut cfg = match env::var("ANALYTICS_ENDPOINT") {
            Ok(endpoint) => Self::new(endpoint)?,
            Err(_) => Self::default(),
        };

        if let Ok(value) = env::var("ANALYTICS_TIMEOUT_MS") {
            let millis: u64 = value.trim().parse().map_err(|_| ClientError::InvalidConfig {
                var: "ANALYTICS_TIMEOUT_MS",
                value: value.clone(),
            })?;
            cfg.request_timeout = Duration::from_millis(millis);
        }

        Ok(cfg)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ClientError> {
    let url = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::InvalidEndpoint(format!(
            "{endpoint}: unsupported scheme {other}"
        ))),
    }
}
