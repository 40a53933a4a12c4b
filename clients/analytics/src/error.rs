use thiserror::Error;

/// Construction-time errors. Emitting events never returns an error.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid analytics endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid value for {var}: {value:?}")]
    InvalidConfig { var: &'static str, value: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no tokio runtime available to run the beacon worker")]
    NoRuntime,
}
