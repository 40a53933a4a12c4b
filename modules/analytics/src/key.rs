//! Storage key minting.
//!
//! A key is `{prefix}:{receipt_millis}:{random}`. It is never derived from
//! the payload, so identical payloads land under distinct keys and no
//! coordination between requests is needed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn mint(prefix: &str, received_at: DateTime<Utc>) -> String {
    format!(
        "{}:{}:{}",
        prefix,
        received_at.timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
