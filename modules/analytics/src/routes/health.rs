use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    let store_up = state.store.ping().await;

    state
        .metrics
        .dep_up
        .with_label_values(&["store"])
        .set(i64::from(store_up.is_ok()));

    store_up.map_err(|e| {
        tracing::warn!(error = %e, backend = state.store.backend(), "store not ready");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(json!({
        "status": "ready",
        "store": state.store.backend()
    })))
}
