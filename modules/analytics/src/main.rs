use analytics_rs::config::{Config, StoreType};
use analytics_rs::metrics::Metrics;
use analytics_rs::AppState;
use kv_store::{InMemoryKv, KvStore, NatsKv};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,analytics_rs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cfg = Config::from_env()?;
    tracing::info!("config loaded");

    let metrics = Metrics::new();

    // Store (fail-fast)
    let store: Arc<dyn KvStore> = match cfg.store_type {
        StoreType::InMemory => {
            tracing::info!("Using InMemory kv store");
            let kv = InMemoryKv::new();
            spawn_purge_task(kv.clone());
            Arc::new(kv)
        }
        StoreType::Nats => {
            tracing::info!(nats_url = %cfg.nats_url, bucket = %cfg.kv_bucket, "Connecting to NATS kv");
            let client = async_nats::connect(&cfg.nats_url).await?;
            Arc::new(NatsKv::connect(client, &cfg.kv_bucket, cfg.retention).await?)
        }
    };
    metrics.dep_up.with_label_values(&["store"]).set(1);

    let state = Arc::new(AppState::new(store, metrics, &cfg));
    let app = analytics_rs::app(state);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, track_path = %cfg.track_path, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Drop expired in-memory entries so the map does not grow without bound
fn spawn_purge_task(kv: InMemoryKv) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = kv.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "purged expired analytics entries");
            }
        }
    });
}
