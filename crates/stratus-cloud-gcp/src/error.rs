//! Google Cloud provider error types

use stratus_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcpError {
    #[error("gcloud not found. Please install the Google Cloud SDK")]
    GcloudNotFound,

    #[error("gcloud command failed: {0}")]
    CommandFailed(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Compute API {operation} failed ({status}): {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("metadata server error: {0}")]
    Metadata(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cloud error: {0}")]
    CloudError(#[from] CloudError),
}

impl From<GcpError> for CloudError {
    fn from(err: GcpError) -> Self {
        match err {
            GcpError::CloudError(e) => e,
            GcpError::NotFound(resource) => CloudError::NotFound(resource),
            other => CloudError::ApiError(format!("gcp: {}", other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, GcpError>;
