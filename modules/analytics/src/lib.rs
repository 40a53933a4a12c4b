pub mod config;
pub mod error;
pub mod key;
pub mod metrics;
pub mod middleware;
pub mod routes;

use axum::{
    http::{HeaderName, HeaderValue},
    middleware::{from_fn, from_fn_with_state},
    routing::{any, get},
    Router,
};
use kv_store::KvStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use analytics_contracts::cors;

use crate::config::Config;
use crate::metrics::Metrics;

/// Shared state for every route
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub metrics: Metrics,
    pub retention: Duration,
    pub key_prefix: String,
    pub track_path: String,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, metrics: Metrics, cfg: &Config) -> Self {
        Self {
            store,
            metrics,
            retention: cfg.retention,
            key_prefix: cfg.key_prefix.clone(),
            track_path: cfg.track_path.clone(),
        }
    }

    /// State with the default retention, key prefix and `/track` path
    pub fn with_defaults(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            metrics: Metrics::new(),
            retention: Duration::from_secs(analytics_contracts::RETENTION_SECS),
            key_prefix: "analytics".to_string(),
            track_path: "/track".to_string(),
        }
    }
}

/// Build the full service router
///
/// Every response, including errors and operational routes, carries the
/// permissive CORS header set.
pub fn app(state: Arc<AppState>) -> Router {
    let track_path = state.track_path.clone();

    let router = Router::new()
        .route(&track_path, any(routes::track::track))
        .route("/health/live", get(routes::health::health_live))
        .route("/health/ready", get(routes::health::health_ready))
        .route("/metrics", get(routes::metrics::metrics))
        // request duration metrics
        .layer(from_fn_with_state(
            state.clone(),
            middleware::metrics::metrics_middleware,
        ))
        .with_state(state)
        // trace id propagation
        .layer(from_fn(middleware::tracing::trace_id_middleware));

    with_cors_headers(router).layer(TraceLayer::new_for_http())
}

fn with_cors_headers(router: Router) -> Router {
    cors::HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}
