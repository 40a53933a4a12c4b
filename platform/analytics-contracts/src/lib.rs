//! # Analytics Contracts
//!
//! Wire-level contract shared by the analytics ingestion service and the
//! client emitter.
//!
//! ## Contents
//!
//! - [`EventPayload`]: the JSON record describing one tracked event
//! - [`validate_payload`]: the acceptance rule applied at the ingestion boundary
//! - [`events`]: event names emitted by the client
//! - [`cors`]: the response headers every ingestion response carries
//!
//! ## Usage
//!
//! ```rust
//! use analytics_contracts::{validate_payload, EventPayload};
//!
//! let payload = EventPayload::new("page_view", "2026-01-01T00:00:00.000Z");
//! let value = serde_json::to_value(&payload).unwrap();
//! assert!(validate_payload(&value).is_ok());
//! ```

pub mod cors;
pub mod events;
mod payload;

pub use payload::{validate_payload, EventPayload, PayloadError};

/// Endpoint the client emits to when no override is configured
pub const DEFAULT_ENDPOINT: &str = "https://analytics.blackroad.io/track";

/// Retention applied to every stored payload (30 days)
pub const RETENTION_SECS: u64 = 2_592_000;
