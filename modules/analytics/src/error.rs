use analytics_contracts::PayloadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kv_store::StoreError;
use thiserror::Error;

/// Everything that can stop an ingestion request short of a stored event
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),

    #[error("malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("failed to read request body: {0}")]
    BodyRead(axum::Error),

    #[error("payload is null")]
    NullPayload,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IngestError {
    pub fn status(&self) -> StatusCode {
        match self {
            IngestError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            IngestError::MalformedBody(_)
            | IngestError::BodyRead(_)
            | IngestError::NullPayload
            | IngestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label for the `result` dimension of the events counter
    pub fn metric_label(&self) -> &'static str {
        match self {
            IngestError::InvalidPayload(_) => "invalid",
            _ => "error",
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match &self {
            IngestError::InvalidPayload(e) => {
                tracing::warn!(error = %e, "rejected analytics payload");
                (self.status(), "Invalid data").into_response()
            }
            IngestError::MalformedBody(e) => {
                tracing::warn!(error = %e, "unparsable analytics body");
                (self.status(), "Error processing request").into_response()
            }
            IngestError::BodyRead(e) => {
                tracing::warn!(error = %e, "failed to read analytics body");
                (self.status(), "Error processing request").into_response()
            }
            IngestError::NullPayload => {
                tracing::warn!("null analytics payload");
                (self.status(), "Error processing request").into_response()
            }
            IngestError::Store(e) => {
                tracing::error!(error = %e, "failed to store analytics event");
                (self.status(), "Error processing request").into_response()
            }
        }
    }
}
