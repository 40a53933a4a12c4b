//! Permissive CORS header set attached to every ingestion response.

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// All three headers as (name, value) pairs, lowercase names
pub const HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", ALLOW_ORIGIN),
    ("access-control-allow-methods", ALLOW_METHODS),
    ("access-control-allow-headers", ALLOW_HEADERS),
];
