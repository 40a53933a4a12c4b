//! The ingestion endpoint.
//!
//! Mounted for every method so that preflight and wrong-verb requests are
//! answered here rather than by the router:
//!
//! 1. `OPTIONS` → 200, empty body
//! 2. anything but `POST` → 405
//! 3. body read in full and parsed as JSON (failure → 500)
//! 4. `event` / `timestamp` validated (failure → 400; a `null` body → 500)
//! 5. raw body stored under a fresh key with the configured retention → 200
//!
//! The body is only read on the `POST` branch and without a size cap, so
//! preflight and wrong-verb answers never depend on what was sent.

use axum::{
    body::{self, Bytes},
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use analytics_contracts::validate_payload;

use crate::error::IngestError;
use crate::{key, AppState};

pub async fn track(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    if parts.method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    if parts.method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    }

    let result = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => ingest(&state, bytes).await,
        Err(e) => Err(IngestError::BodyRead(e)),
    };

    match result {
        Ok(key) => {
            state
                .metrics
                .analytics_events_total
                .with_label_values(&["stored"])
                .inc();
            tracing::debug!(%key, "analytics event stored");

            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(e) => {
            state
                .metrics
                .analytics_events_total
                .with_label_values(&[e.metric_label()])
                .inc();

            e.into_response()
        }
    }
}

/// Parse, validate and persist one submission, returning the key it was
/// stored under
async fn ingest(state: &AppState, body: Bytes) -> Result<String, IngestError> {
    let payload: Value = serde_json::from_slice(&body)?;
    if payload.is_null() {
        return Err(IngestError::NullPayload);
    }
    validate_payload(&payload)?;

    let key = key::mint(&state.key_prefix, Utc::now());

    tracing::info!(
        %key,
        event = payload["event"].as_str().unwrap_or_default(),
        bytes = body.len(),
        "storing analytics event"
    );

    state.store.put(&key, body.to_vec(), state.retention).await?;

    Ok(key)
}
