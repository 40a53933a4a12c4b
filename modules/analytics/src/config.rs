use std::env;
use std::str::FromStr;
use std::time::Duration;

use analytics_contracts::RETENTION_SECS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("TRACK_PATH must start with '/': {0:?}")]
    TrackPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreType {
    Nats,
    InMemory,
}

impl StoreType {
    pub fn from_env() -> Self {
        match env::var("STORE_TYPE")
            .unwrap_or_else(|_| "inmemory".to_string())
            .to_lowercase()
            .as_str()
        {
            "nats" => StoreType::Nats,
            "inmemory" => StoreType::InMemory,
            other => {
                tracing::warn!(store_type = other, "Unknown STORE_TYPE, defaulting to inmemory");
                StoreType::InMemory
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub store_type: StoreType,
    pub nats_url: String,
    pub kv_bucket: String,

    pub retention: Duration,
    pub track_path: String,
    pub key_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let track_path = env::var("TRACK_PATH").unwrap_or_else(|_| "/track".to_string());
        if !track_path.starts_with('/') {
            return Err(ConfigError::TrackPath(track_path));
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,

            store_type: StoreType::from_env(),
            nats_url: env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string()),
            kv_bucket: env::var("KV_BUCKET").unwrap_or_else(|_| "ANALYTICS".to_string()),

            retention: Duration::from_secs(parse_var("RETENTION_SECS", RETENTION_SECS)?),
            track_path,
            key_prefix: env::var("KEY_PREFIX").unwrap_or_else(|_| "analytics".to_string()),
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
