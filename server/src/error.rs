//! Errors of the HTTP layer and their mapping to responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nerlabel::{ExportError, StoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DatasetNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidAnnotation(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Io(_) | Self::Serialization(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UnknownDataset(name) => Self::DatasetNotFound(name),
            e => Self::Store(e),
        }
    }
}

impl From<ExportError> for ServerError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::DatasetNotFound(name) => Self::DatasetNotFound(name),
            ExportError::Store(e) => Self::Store(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
